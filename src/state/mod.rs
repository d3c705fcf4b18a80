/// Pending invite tracker.
pub mod pending;
/// Durable record book keyed by team id.
pub mod records;

use crate::{
    activity_log::ActivityLog,
    config::AppConfig,
    dao::{storage::StorageResult, team_store::TeamStore},
};

pub use self::pending::PendingInvites;
pub use self::records::RecordBook;

/// Process-scoped saver state: durable records, owed invites and hook gating.
///
/// Owned by a single [`crate::TeamSaver`]; every access goes through `&mut`.
pub struct SaverState {
    config: AppConfig,
    store: Box<dyn TeamStore>,
    log: ActivityLog,
    records: RecordBook,
    pending: PendingInvites,
    ready: bool,
}

impl SaverState {
    /// Fresh state with an empty record book. Call [`SaverState::load`] to read the store.
    pub fn new(config: AppConfig, store: Box<dyn TeamStore>, log: ActivityLog) -> Self {
        Self {
            config,
            store,
            log,
            records: RecordBook::new(),
            pending: PendingInvites::new(),
            ready: false,
        }
    }

    /// Replace the record book with the persisted container.
    ///
    /// Unreadable data is treated as an empty store.
    pub fn load(&mut self) {
        match self.store.load() {
            Ok(Some(data)) => {
                self.records = data.into();
                tracing::info!(
                    store = %self.store.describe(),
                    teams = self.records.len(),
                    "loaded team data"
                );
            }
            Ok(None) => {
                self.records.clear();
                tracing::info!(store = %self.store.describe(), "no team data found; starting empty");
            }
            Err(err) => {
                self.records.clear();
                self.log.warn(format!(
                    "Failed to load team data from {} ({err}); starting with an empty store",
                    self.store.describe()
                ));
            }
        }
    }

    /// Write the whole record book through to the store.
    ///
    /// Failures are logged; the in-memory book is kept so the next persist retries.
    pub fn persist(&self) -> bool {
        match self.try_persist() {
            Ok(()) => true,
            Err(err) => {
                self.log.error(format!(
                    "Failed to save team data to {}: {err}",
                    self.store.describe()
                ));
                false
            }
        }
    }

    fn try_persist(&self) -> StorageResult<()> {
        self.store.save(&self.records.to_stored_data())
    }

    /// Saver configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Activity log sink.
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Durable records.
    pub fn records(&self) -> &RecordBook {
        &self.records
    }

    /// Mutable durable records.
    pub fn records_mut(&mut self) -> &mut RecordBook {
        &mut self.records
    }

    /// Owed invitations.
    pub fn pending(&self) -> &PendingInvites {
        &self.pending
    }

    /// Mutable owed invitations.
    pub fn pending_mut(&mut self) -> &mut PendingInvites {
        &mut self.pending
    }

    /// Whether incremental handlers are live.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Toggle incremental handlers.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
}
