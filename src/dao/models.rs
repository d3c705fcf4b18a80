use serde::{Deserialize, Serialize};

use crate::dao::storage::{StorageError, StorageResult};

/// Identifier of a team inside the live registry and the durable store.
pub type TeamId = u64;
/// Identifier of a player.
pub type PlayerId = u64;

/// Current revision of the on-disk container.
pub const STORED_DATA_VERSION: u32 = 1;

/// Durable snapshot of a single team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    /// Identifier of the team this record was captured from.
    pub team_id: TeamId,
    /// Leader at capture time; not required to appear in `members`.
    pub leader_id: PlayerId,
    /// Members in the order they were attached.
    #[serde(default)]
    pub members: Vec<PlayerId>,
    /// Outstanding invitations at capture time.
    #[serde(default)]
    pub invites: Vec<PlayerId>,
}

impl TeamRecord {
    /// Build an empty record for `team_id` led by `leader_id`.
    pub fn new(team_id: TeamId, leader_id: PlayerId) -> Self {
        Self {
            team_id,
            leader_id,
            members: Vec::new(),
            invites: Vec::new(),
        }
    }

    /// Replace the member list, dropping duplicates while keeping the first occurrence.
    pub fn set_members(&mut self, members: &[PlayerId]) {
        self.members = dedup_ordered(members);
    }

    /// Replace the invite list, dropping duplicates while keeping the first occurrence.
    pub fn set_invites(&mut self, invites: &[PlayerId]) {
        self.invites = dedup_ordered(invites);
    }

    /// Append a member. Returns `false` when the player was already listed.
    pub fn add_member(&mut self, player_id: PlayerId) -> bool {
        push_unique(&mut self.members, player_id)
    }

    /// Remove a member. Returns `false` when the player was not listed.
    pub fn remove_member(&mut self, player_id: PlayerId) -> bool {
        remove_value(&mut self.members, player_id)
    }

    /// Append an invitee. Returns `false` when the player was already invited.
    pub fn add_invite(&mut self, player_id: PlayerId) -> bool {
        push_unique(&mut self.invites, player_id)
    }

    /// Remove an invitee. Returns `false` when the player was not invited.
    pub fn remove_invite(&mut self, player_id: PlayerId) -> bool {
        remove_value(&mut self.invites, player_id)
    }
}

/// Versioned container persisted by every team store backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredData {
    /// Format revision, see [`STORED_DATA_VERSION`].
    pub version: u32,
    /// Every known team, in store order.
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

impl StoredData {
    /// Wrap `teams` in a container stamped with the current version.
    pub fn new(teams: Vec<TeamRecord>) -> Self {
        Self {
            version: STORED_DATA_VERSION,
            teams,
        }
    }

    /// Reject containers written by a newer revision of the format.
    pub fn check_version(self) -> StorageResult<Self> {
        if self.version > STORED_DATA_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: self.version,
            });
        }
        Ok(self)
    }
}

impl Default for StoredData {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn dedup_ordered(values: &[PlayerId]) -> Vec<PlayerId> {
    let mut out = Vec::with_capacity(values.len());
    for &value in values {
        push_unique(&mut out, value);
    }
    out
}

fn push_unique(values: &mut Vec<PlayerId>, value: PlayerId) -> bool {
    if values.contains(&value) {
        return false;
    }
    values.push(value);
    true
}

fn remove_value(values: &mut Vec<PlayerId>, value: PlayerId) -> bool {
    let Some(index) = values.iter().position(|existing| *existing == value) else {
        return false;
    };
    values.remove(index);
    true
}
