use thiserror::Error;

use crate::dao::storage::StorageError;

/// Errors surfaced by saver operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The host runs with teams disabled; nothing is saved or restored this session.
    #[error("teams are disabled on this server (max team size {max_team_size})")]
    TeamsDisabled {
        /// Size reported by the host.
        max_team_size: u32,
    },
    /// The durable store could not be read or written.
    #[error("team storage failed")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err)
    }
}
