use tracing::debug;

use crate::{
    dao::models::PlayerId,
    dto::notification::{CLIENT_PENDING_INVITE, PendingInviteNotice, UNKNOWN_LEADER_NAME},
    host::{GameHost, PresenceResolver},
    state::SaverState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a pending invite delivery attempt.
pub enum InviteDelivery {
    /// No invitation is owed to the player.
    NothingOwed,
    /// The owed team is gone or no longer lists the player; the entry was dropped.
    Stale,
    /// The player has no session; the entry is kept for the next attempt.
    Unreachable,
    /// The notification was sent and the entry consumed.
    Delivered,
}

/// Deliver the invitation owed to `invitee_id`, at most once.
pub fn send_pending_invite<H>(
    state: &mut SaverState,
    host: &mut H,
    invitee_id: PlayerId,
) -> InviteDelivery
where
    H: GameHost + ?Sized,
{
    let Some(team_id) = state.pending().owed_team(invitee_id) else {
        return InviteDelivery::NothingOwed;
    };

    let team = match host.find_team(team_id) {
        Some(team) if team.invites.contains(&invitee_id) => team,
        _ => {
            state.pending_mut().take(invitee_id);
            debug!(team_id, invitee_id, "dropping stale pending invite");
            return InviteDelivery::Stale;
        }
    };

    let Some(session) = host.resolve_player(invitee_id) else {
        return InviteDelivery::Unreachable;
    };

    let notice = PendingInviteNotice {
        leader_name: leader_display_name(&*host, team.leader_id),
        leader_id: team.leader_id,
        team_id: team.id,
    };
    host.notify_client(&session, CLIENT_PENDING_INVITE, &notice);
    state.pending_mut().take(invitee_id);

    state.log().info(format!(
        "{} Sent pending invite from {} to {}",
        team.id, notice.leader_name, session.display_name
    ));
    InviteDelivery::Delivered
}

/// Leader name from the live session, then the identity lookup, then [`UNKNOWN_LEADER_NAME`].
fn leader_display_name<P>(presence: &P, leader_id: PlayerId) -> String
where
    P: PresenceResolver + ?Sized,
{
    presence
        .resolve_player(leader_id)
        .map(|session| session.display_name)
        .or_else(|| presence.lookup_display_name(leader_id))
        .unwrap_or_else(|| UNKNOWN_LEADER_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        activity_log::ActivityLog,
        config::AppConfig,
        dao::team_store::memory::MemoryStore,
        host::{LiveTeam, memory::MemoryHost},
    };

    fn setup() -> (SaverState, MemoryHost) {
        let state = SaverState::new(
            AppConfig::default(),
            Box::new(MemoryStore::new()),
            ActivityLog::memory(),
        );
        let mut host = MemoryHost::new();
        let mut team = LiveTeam::new(5, 100);
        team.members = vec![100];
        team.invites = vec![102];
        host.insert_team(team);
        (state, host)
    }

    #[test]
    fn nothing_owed_is_a_no_op() {
        let (mut state, mut host) = setup();
        host.connect(102, "invitee");
        assert_eq!(
            send_pending_invite(&mut state, &mut host, 102),
            InviteDelivery::NothingOwed
        );
        assert!(host.sent_notices().is_empty());
    }

    #[test]
    fn delivery_happens_once() {
        let (mut state, mut host) = setup();
        host.connect(100, "leader");
        host.connect(102, "invitee");
        state.pending_mut().record(102, 5);

        assert_eq!(
            send_pending_invite(&mut state, &mut host, 102),
            InviteDelivery::Delivered
        );
        assert_eq!(
            send_pending_invite(&mut state, &mut host, 102),
            InviteDelivery::NothingOwed
        );

        let sent = host.sent_notices();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel, CLIENT_PENDING_INVITE);
        assert_eq!(
            sent[0].notice,
            PendingInviteNotice {
                leader_name: "leader".into(),
                leader_id: 100,
                team_id: 5,
            }
        );
    }

    #[test]
    fn unreachable_invitee_keeps_entry() {
        let (mut state, mut host) = setup();
        state.pending_mut().record(102, 5);

        assert_eq!(
            send_pending_invite(&mut state, &mut host, 102),
            InviteDelivery::Unreachable
        );
        assert_eq!(state.pending().owed_team(102), Some(5));
    }

    #[test]
    fn missing_team_drops_entry() {
        let (mut state, mut host) = setup();
        host.connect(102, "invitee");
        state.pending_mut().record(102, 5);
        host.remove_team(5);

        assert_eq!(
            send_pending_invite(&mut state, &mut host, 102),
            InviteDelivery::Stale
        );
        assert!(state.pending().is_empty());
        assert!(host.sent_notices().is_empty());
    }

    #[test]
    fn leader_name_falls_back_to_lookup_then_unknown() {
        let (mut state, mut host) = setup();
        host.connect(102, "invitee");
        host.remember_name(100, "offline leader");
        state.pending_mut().record(102, 5);
        send_pending_invite(&mut state, &mut host, 102);
        assert_eq!(host.sent_notices()[0].notice.leader_name, "offline leader");

        let (mut state, mut host) = setup();
        host.connect(102, "invitee");
        state.pending_mut().record(102, 5);
        send_pending_invite(&mut state, &mut host, 102);
        assert_eq!(host.sent_notices()[0].notice.leader_name, UNKNOWN_LEADER_NAME);
    }
}
