//! Collaborator traits implemented by the game host.
//!
//! The host owns the authoritative teams. The saver only ever sees copies fetched by id
//! and writes changes back through [`LiveRegistry::write_team`].

/// In-process host used by tests and embedders without a game server.
pub mod memory;

use crate::dao::models::{PlayerId, TeamId, TeamRecord};
use crate::dto::notification::PendingInviteNotice;

/// Copy of a team as currently held by the live registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveTeam {
    /// Registry-assigned identifier.
    pub id: TeamId,
    /// Current leader.
    pub leader_id: PlayerId,
    /// Members in registry order.
    pub members: Vec<PlayerId>,
    /// Pending invitees in registry order.
    pub invites: Vec<PlayerId>,
}

impl LiveTeam {
    /// Team with no members and no invites.
    pub fn new(id: TeamId, leader_id: PlayerId) -> Self {
        Self {
            id,
            leader_id,
            members: Vec::new(),
            invites: Vec::new(),
        }
    }
}

impl From<&LiveTeam> for TeamRecord {
    fn from(team: &LiveTeam) -> Self {
        let mut record = TeamRecord::new(team.id, team.leader_id);
        record.set_members(&team.members);
        record.set_invites(&team.invites);
        record
    }
}

/// Reachable player session, either connected or asleep in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Player owning the session.
    pub player_id: PlayerId,
    /// Name shown to other players.
    pub display_name: String,
}

/// Authoritative team store of the host.
pub trait LiveRegistry {
    /// Configured team size limit; values below 1 mean teams are disabled.
    fn max_team_size(&self) -> u32;
    /// Fresh copy of the team currently registered under `id`.
    fn find_team(&self, id: TeamId) -> Option<LiveTeam>;
    /// Create an empty team. The registry picks the identifier.
    fn create_team(&mut self) -> LiveTeam;
    /// Copies of every live team in registry order.
    fn all_teams(&self) -> Vec<LiveTeam>;
    /// Overwrite leader, members and invites of `team.id` and mark it dirty.
    ///
    /// Returns `false` when the team no longer exists.
    fn write_team(&mut self, team: &LiveTeam) -> bool;
    /// Point the player's current-team field at `team_id` and push a network update.
    fn set_player_current_team(&mut self, player_id: PlayerId, team_id: TeamId);
    /// Record the player to team back-reference used by the registry's own lookups.
    fn register_membership(&mut self, player_id: PlayerId, team_id: TeamId);
}

/// Player session lookup.
pub trait PresenceResolver {
    /// Connected or sleeping session for `player_id`, if any.
    fn resolve_player(&self, player_id: PlayerId) -> Option<SessionHandle>;
    /// Last known display name of a player without a session.
    fn lookup_display_name(&self, _player_id: PlayerId) -> Option<String> {
        None
    }
}

/// Outgoing notifications towards clients and other host subscribers.
pub trait HostNotifier {
    /// Fire-and-forget RPC to the client behind `session`.
    fn notify_client(
        &mut self,
        session: &SessionHandle,
        channel: &str,
        notice: &PendingInviteNotice,
    );
    /// Called once per team after its restore completed.
    fn team_restored(&mut self, _team: &LiveTeam) {}
}

/// Everything the saver needs from the host.
pub trait GameHost: LiveRegistry + PresenceResolver + HostNotifier {}

impl<T> GameHost for T where T: LiveRegistry + PresenceResolver + HostNotifier {}
