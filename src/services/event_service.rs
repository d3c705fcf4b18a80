use tracing::debug;

use crate::{
    dao::models::TeamRecord,
    dto::events::TeamEvent,
    host::GameHost,
    services::snapshot_service::capture_team,
    state::SaverState,
};

/// Mirror a live-side team change into the durable store.
///
/// Inert until the startup restore completed. Returns `true` when the store changed,
/// in which case it has already been persisted.
pub fn handle_team_event<H>(state: &mut SaverState, host: &mut H, event: TeamEvent) -> bool
where
    H: GameHost + ?Sized,
{
    if !state.is_ready() {
        debug!(?event, "saver not ready; ignoring team event");
        return false;
    }

    let team_id = event.team_id();

    if let TeamEvent::TeamDisbanded { .. } = event {
        state.log().info(format!("{team_id} Team Disbanded"));
        let dropped = state.pending_mut().forget_team(team_id);
        if dropped > 0 {
            debug!(team_id, dropped, "dropped pending invites of disbanded team");
        }
        if state.records_mut().remove(team_id).is_none() {
            return false;
        }
        state.persist();
        return true;
    }

    match event {
        TeamEvent::InviteCreated { invitee_id, .. } => {
            if host.resolve_player(invitee_id).is_none() {
                state.pending_mut().record(invitee_id, team_id);
            }
        }
        TeamEvent::InviteAccepted { player_id, .. }
        | TeamEvent::InviteRejected { player_id, .. } => {
            state.pending_mut().take_for_team(player_id, team_id);
        }
        _ => {}
    }

    let changed = match host.find_team(team_id) {
        Some(team) => {
            capture_team(state, &team);
            true
        }
        None => apply_event_delta(state, event),
    };

    if changed {
        state.persist();
    }
    changed
}

/// Edit the stored record from the event payload when the live team is already gone.
fn apply_event_delta(state: &mut SaverState, event: TeamEvent) -> bool {
    let team_id = event.team_id();

    if let TeamEvent::TeamCreated { leader_id, .. } = event {
        let mut record = TeamRecord::new(team_id, leader_id);
        record.add_member(leader_id);
        state.records_mut().upsert(record);
        return true;
    }

    let Some(record) = state.records_mut().get_mut(team_id) else {
        state
            .log()
            .error(format!("{team_id} {}: StoredTeam not found!", event.kind()));
        return false;
    };

    match event {
        TeamEvent::InviteCreated { invitee_id, .. } => record.add_invite(invitee_id),
        TeamEvent::InviteAccepted { player_id, .. } => {
            record.remove_invite(player_id) | record.add_member(player_id)
        }
        TeamEvent::InviteRejected { player_id, .. } => record.remove_invite(player_id),
        TeamEvent::MemberLeft { player_id, .. } => record.remove_member(player_id),
        TeamEvent::MemberKicked { target_id, .. } => record.remove_member(target_id),
        TeamEvent::LeaderPromoted { leader_id, .. } => {
            let changed = record.leader_id != leader_id;
            record.leader_id = leader_id;
            changed
        }
        TeamEvent::TeamCreated { .. }
        | TeamEvent::TeamUpdated { .. }
        | TeamEvent::TeamDisbanded { .. } => false,
    }
}
