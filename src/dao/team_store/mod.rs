/// JSON file backend.
#[cfg(feature = "json-store")]
pub mod json_file;
/// In-process backend sharing one buffer between clones.
pub mod memory;

use crate::dao::models::StoredData;
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence medium holding the durable team records.
///
/// Saves replace the whole container; backends never diff.
pub trait TeamStore {
    /// Read the container, returning `None` when nothing has been persisted yet.
    fn load(&self) -> StorageResult<Option<StoredData>>;
    /// Replace the persisted container with `data`.
    fn save(&self, data: &StoredData) -> StorageResult<()>;
    /// Human readable location used in log lines.
    fn describe(&self) -> String;
}
