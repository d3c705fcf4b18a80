use std::collections::HashSet;

use tracing::debug;

use crate::{
    dao::models::{TeamId, TeamRecord},
    host::GameHost,
    services::invite_service::{InviteDelivery, send_pending_invite},
    state::SaverState,
};

/// Merge durable records back into the live registry, last record first.
///
/// Returns the number of teams written to the registry. The record book is persisted
/// once at the end.
pub fn restore_all<H>(state: &mut SaverState, host: &mut H, records: &[TeamRecord]) -> usize
where
    H: GameHost + ?Sized,
{
    let mut claimed = HashSet::new();
    let restored = records
        .iter()
        .rev()
        .filter(|record| restore_record(state, host, record, &mut claimed).is_some())
        .count();

    if !records.is_empty() {
        state.persist();
    }
    restored
}

/// Reconcile a single record and return the live id it now lives under.
///
/// The live team is reused when the registry still holds `record.team_id`, otherwise a
/// new one is created and the record is re-keyed under the registry's id.
pub fn restore_team<H>(state: &mut SaverState, host: &mut H, record: &TeamRecord) -> Option<TeamId>
where
    H: GameHost + ?Sized,
{
    restore_record(state, host, record, &mut HashSet::new())
}

/// `claimed` holds the live ids already filled during the current pass; a record whose
/// id collides with one of them gets a fresh team instead of overwriting it.
fn restore_record<H>(
    state: &mut SaverState,
    host: &mut H,
    record: &TeamRecord,
    claimed: &mut HashSet<TeamId>,
) -> Option<TeamId>
where
    H: GameHost + ?Sized,
{
    let leader_missing = host.resolve_player(record.leader_id).is_none();
    if leader_missing {
        state.log().warn(format!(
            "Can't find player {} teamLeader of a team {}",
            record.leader_id, record.team_id
        ));
    }

    let mut team = match host.find_team(record.team_id) {
        Some(team) if !claimed.contains(&team.id) => team,
        _ => host.create_team(),
    };
    team.leader_id = record.leader_id;
    team.invites.clone_from(&record.invites);
    team.members.clone_from(&record.members);

    if !host.write_team(&team) {
        state.log().error(format!(
            "Live team {} vanished while restoring saved team {}",
            team.id, record.team_id
        ));
        return None;
    }
    claimed.insert(team.id);

    for &member_id in &team.members {
        host.register_membership(member_id, team.id);
        if host.resolve_player(member_id).is_some() {
            host.set_player_current_team(member_id, team.id);
        } else if !(leader_missing && member_id == record.leader_id) {
            state.log().warn(format!(
                "Can't find player {member_id} while restoring team members of a team {}",
                team.id
            ));
        }
    }

    for &invitee_id in &team.invites {
        state.pending_mut().record(invitee_id, team.id);
        match send_pending_invite(state, host, invitee_id) {
            InviteDelivery::Unreachable => state.log().warn(format!(
                "Can't find player {invitee_id} while restoring invites of a team {}",
                team.id
            )),
            outcome => debug!(team_id = team.id, invitee_id, ?outcome, "restored invite"),
        }
    }

    if team.id == record.team_id {
        state.log().info(format!("Saved team {} restored", record.team_id));
    } else {
        if state.records().get(record.team_id) == Some(record) {
            state.records_mut().remove(record.team_id);
        }
        state.log().info(format!(
            "Saved team {} restored to new team {}",
            record.team_id, team.id
        ));
    }
    state.records_mut().upsert((&team).into());

    let reconciled = host.find_team(team.id).unwrap_or(team);
    host.team_restored(&reconciled);
    Some(reconciled.id)
}
