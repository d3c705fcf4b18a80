use indexmap::IndexMap;

use crate::dao::models::{PlayerId, TeamId};

/// Invitations owed to players who could not be reached yet.
///
/// One entry per invitee; recording a newer invite replaces the older one.
#[derive(Debug, Clone, Default)]
pub struct PendingInvites {
    owed: IndexMap<PlayerId, TeamId>,
}

impl PendingInvites {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `invitee_id` is owed a notification for `team_id`.
    pub fn record(&mut self, invitee_id: PlayerId, team_id: TeamId) -> Option<TeamId> {
        self.owed.insert(invitee_id, team_id)
    }

    /// Team owed to `invitee_id`, if any.
    pub fn owed_team(&self, invitee_id: PlayerId) -> Option<TeamId> {
        self.owed.get(&invitee_id).copied()
    }

    /// Consume the entry of `invitee_id`.
    pub fn take(&mut self, invitee_id: PlayerId) -> Option<TeamId> {
        self.owed.shift_remove(&invitee_id)
    }

    /// Consume the entry of `invitee_id` only when it points at `team_id`.
    pub fn take_for_team(&mut self, invitee_id: PlayerId, team_id: TeamId) -> bool {
        if self.owed_team(invitee_id) != Some(team_id) {
            return false;
        }
        self.owed.shift_remove(&invitee_id).is_some()
    }

    /// Drop every entry owed for `team_id`, returning how many were dropped.
    pub fn forget_team(&mut self, team_id: TeamId) -> usize {
        let before = self.owed.len();
        self.owed.retain(|_, owed| *owed != team_id);
        before - self.owed.len()
    }

    /// Number of outstanding entries.
    pub fn len(&self) -> usize {
        self.owed.len()
    }

    /// Whether nothing is owed.
    pub fn is_empty(&self) -> bool {
        self.owed.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.owed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_invite_replaces_older_entry() {
        let mut pending = PendingInvites::new();
        assert_eq!(pending.record(102, 5), None);
        assert_eq!(pending.record(102, 6), Some(5));
        assert_eq!(pending.owed_team(102), Some(6));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn take_for_team_ignores_other_teams() {
        let mut pending = PendingInvites::new();
        pending.record(102, 5);

        assert!(!pending.take_for_team(102, 6));
        assert!(pending.take_for_team(102, 5));
        assert!(pending.is_empty());
    }

    #[test]
    fn forget_team_drops_only_that_team() {
        let mut pending = PendingInvites::new();
        pending.record(1, 5);
        pending.record(2, 5);
        pending.record(3, 7);

        assert_eq!(pending.forget_team(5), 2);
        assert_eq!(pending.owed_team(3), Some(7));
    }
}
