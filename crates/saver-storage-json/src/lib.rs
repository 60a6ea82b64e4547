//! saver-storage-json
//!
//! Filesystem-backed [`KeyValueStorage`]: every key lives in one JSON object
//! document that is rewritten atomically (temp file + rename) on each write.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use saver_core::{CoreError, KeyValueStorage};
use tracing::warn;

pub const STORAGE_FILE_NAME: &str = "local_storage.json";
const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct JsonKeyValueStorage {
    path: PathBuf,
}

impl JsonKeyValueStorage {
    /// Stores entries in `<dir>/local_storage.json`, creating `dir` if needed.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STORAGE_FILE_NAME),
        })
    }

    /// Stores entries in the given file.
    pub fn at_path(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.read_entries()?.into_keys().collect())
    }

    fn read_entries(&self) -> Result<Entries, CoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(err.into()),
        };
        if data.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    /// Entries to build the next document from. An undecodable document is moved
    /// aside so writes can proceed.
    fn entries_for_write(&self) -> Result<Entries, CoreError> {
        match self.read_entries() {
            Ok(entries) => Ok(entries),
            Err(CoreError::Serde(reason)) => {
                let aside = with_suffix(&self.path, CORRUPT_SUFFIX);
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    "storage document unreadable ({reason}); starting a fresh one"
                );
                fs::rename(&self.path, &aside)?;
                Ok(Entries::new())
            }
            Err(err) => Err(err),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = with_suffix(&self.path, TMP_SUFFIX);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for JsonKeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.entries_for_write()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut target = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    target.set_extension(ext);
    target
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
