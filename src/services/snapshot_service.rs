use crate::{
    dao::models::TeamRecord,
    host::{LiveRegistry, LiveTeam},
    state::SaverState,
};

/// Replace the durable store with one record per live team and persist it.
///
/// Returns the number of captured teams. Repeated calls without live mutation write
/// identical payloads.
pub fn snapshot_all<R>(state: &mut SaverState, registry: &R) -> usize
where
    R: LiveRegistry + ?Sized,
{
    let records: Vec<TeamRecord> = registry.all_teams().iter().map(Into::into).collect();
    let count = records.len();

    state.records_mut().replace_all(records);
    state.persist();
    tracing::debug!(teams = count, "snapshot written");
    count
}

/// Upsert the record of one live team without persisting. Returns `true` when it was new.
pub fn capture_team(state: &mut SaverState, team: &LiveTeam) -> bool {
    let is_new = !state.records().contains(team.id);
    state.records_mut().upsert(team.into());
    is_new
}
