use indexmap::IndexMap;

use crate::dao::models::{StoredData, TeamId, TeamRecord};

/// In-memory durable record store, keyed by team id in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBook {
    teams: IndexMap<TeamId, TeamRecord>,
}

impl RecordBook {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the book holds no record.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Record stored under `team_id`.
    pub fn get(&self, team_id: TeamId) -> Option<&TeamRecord> {
        self.teams.get(&team_id)
    }

    /// Mutable record stored under `team_id`.
    pub fn get_mut(&mut self, team_id: TeamId) -> Option<&mut TeamRecord> {
        self.teams.get_mut(&team_id)
    }

    /// Whether a record exists for `team_id`.
    pub fn contains(&self, team_id: TeamId) -> bool {
        self.teams.contains_key(&team_id)
    }

    /// Insert or replace the record under its own team id, keeping the slot of a replaced record.
    pub fn upsert(&mut self, record: TeamRecord) {
        self.teams.insert(record.team_id, record);
    }

    /// Remove the record for `team_id`, preserving the order of the others.
    pub fn remove(&mut self, team_id: TeamId) -> Option<TeamRecord> {
        self.teams.shift_remove(&team_id)
    }

    /// Replace the whole content with `records`. Later duplicates of an id win.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = TeamRecord>) {
        self.teams = records
            .into_iter()
            .map(|record| (record.team_id, record))
            .collect();
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.teams.clear();
    }

    /// Team ids in store order.
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.keys().copied().collect()
    }

    /// Records in store order.
    pub fn records(&self) -> impl Iterator<Item = &TeamRecord> {
        self.teams.values()
    }

    /// Container ready to be persisted.
    pub fn to_stored_data(&self) -> StoredData {
        StoredData::new(self.teams.values().cloned().collect())
    }
}

impl From<StoredData> for RecordBook {
    fn from(data: StoredData) -> Self {
        let mut book = RecordBook::new();
        book.replace_all(data.teams);
        book
    }
}
