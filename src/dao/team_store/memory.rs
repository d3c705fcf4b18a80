use std::{cell::RefCell, rc::Rc};

use crate::dao::{
    models::StoredData,
    storage::{StorageError, StorageResult},
    team_store::TeamStore,
};

/// In-process store keeping the last serialized payload.
///
/// Clones share the same buffer, so a test can hand one clone to a saver and inspect
/// the other after the saver has been dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `data`, as if a previous session had saved it.
    pub fn with_data(data: &StoredData) -> StorageResult<Self> {
        let store = Self::new();
        store.save(data)?;
        store.inner.borrow_mut().saves = 0;
        Ok(store)
    }

    /// Raw payload last written, if any.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.inner.borrow().bytes.clone()
    }

    /// Overwrite the raw payload, bypassing encoding.
    pub fn set_bytes(&self, bytes: impl Into<Vec<u8>>) {
        self.inner.borrow_mut().bytes = Some(bytes.into());
    }

    /// Number of saves performed since creation.
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl TeamStore for MemoryStore {
    fn load(&self) -> StorageResult<Option<StoredData>> {
        let inner = self.inner.borrow();
        let Some(bytes) = inner.bytes.as_deref() else {
            return Ok(None);
        };

        let data = serde_json::from_slice::<StoredData>(bytes).map_err(|source| {
            StorageError::Decode {
                path: self.describe().into(),
                source,
            }
        })?;
        data.check_version().map(Some)
    }

    fn save(&self, data: &StoredData) -> StorageResult<()> {
        let bytes = serde_json::to_vec(data).map_err(|source| StorageError::Encode { source })?;
        let mut inner = self.inner.borrow_mut();
        inner.bytes = Some(bytes);
        inner.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
