use crate::dao::models::{PlayerId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Live-side team change reported by the host after it has applied the change.
pub enum TeamEvent {
    /// A team was formed with `leader_id` as its first member.
    TeamCreated { team_id: TeamId, leader_id: PlayerId },
    /// Generic change; the live team is re-read in full.
    TeamUpdated { team_id: TeamId },
    /// The team no longer exists.
    TeamDisbanded { team_id: TeamId },
    /// `invitee_id` was invited to join.
    InviteCreated { team_id: TeamId, invitee_id: PlayerId },
    /// `player_id` accepted an invite and became a member.
    InviteAccepted { team_id: TeamId, player_id: PlayerId },
    /// `player_id` declined an invite.
    InviteRejected { team_id: TeamId, player_id: PlayerId },
    /// `player_id` left the team.
    MemberLeft { team_id: TeamId, player_id: PlayerId },
    /// `target_id` was removed by the leader.
    MemberKicked { team_id: TeamId, target_id: PlayerId },
    /// Leadership moved to `leader_id`.
    LeaderPromoted { team_id: TeamId, leader_id: PlayerId },
}

impl TeamEvent {
    /// Team the event refers to.
    pub fn team_id(&self) -> TeamId {
        match *self {
            Self::TeamCreated { team_id, .. }
            | Self::TeamUpdated { team_id }
            | Self::TeamDisbanded { team_id }
            | Self::InviteCreated { team_id, .. }
            | Self::InviteAccepted { team_id, .. }
            | Self::InviteRejected { team_id, .. }
            | Self::MemberLeft { team_id, .. }
            | Self::MemberKicked { team_id, .. }
            | Self::LeaderPromoted { team_id, .. } => team_id,
        }
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TeamCreated { .. } => "team created",
            Self::TeamUpdated { .. } => "team updated",
            Self::TeamDisbanded { .. } => "team disbanded",
            Self::InviteCreated { .. } => "invite created",
            Self::InviteAccepted { .. } => "invite accepted",
            Self::InviteRejected { .. } => "invite rejected",
            Self::MemberLeft { .. } => "member left",
            Self::MemberKicked { .. } => "member kicked",
            Self::LeaderPromoted { .. } => "leader promoted",
        }
    }
}
