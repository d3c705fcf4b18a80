//! Team store writing one JSON document per store name.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::dao::{
    models::StoredData,
    storage::{StorageError, StorageResult},
    team_store::TeamStore,
};

const FILE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// File-backed store at `<dir>/<name>.json`, written atomically through a sibling temp file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store for `name` under `dir`. Nothing touches the disk until the first load or save.
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{name}.{FILE_EXTENSION}")),
        }
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_stem().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(TEMP_EXTENSION);
        self.path.with_file_name(name)
    }
}

impl TeamStore for JsonFileStore {
    fn load(&self) -> StorageResult<Option<StoredData>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::io(&self.path, err)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let data = serde_json::from_slice::<StoredData>(&bytes).map_err(|source| {
            StorageError::Decode {
                path: self.path.clone(),
                source,
            }
        })?;

        data.check_version().map(Some)
    }

    fn save(&self, data: &StoredData) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let bytes =
            serde_json::to_vec_pretty(data).map_err(|source| StorageError::Encode { source })?;

        let tmp_path = self.temp_path();
        fs::write(&tmp_path, bytes).map_err(|err| StorageError::io(&tmp_path, err))?;
        fs::rename(&tmp_path, &self.path).map_err(|err| StorageError::io(&self.path, err))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
