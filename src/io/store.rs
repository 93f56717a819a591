use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::warn;

use crate::model::LatLng;

/// Key under which the last submitted map position is kept
pub const LASTPOS_KEY: &str = "lastpos";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Small persistent string-to-string store (state.json in the data dir).
///
/// Values are opaque strings, the way a browser's local storage holds them;
/// callers own the encoding of each key.
#[derive(Debug, Clone)]
pub struct ScratchStore {
    path: PathBuf,
    items: IndexMap<String, String>,
}

impl ScratchStore {
    /// Open the store at `path`. A missing or malformed file is an empty store.
    pub fn open(path: &Path) -> Self {
        let items = fs::read_to_string(path)
            .ok()
            .and_then(|content| match serde_json::from_str(&content) {
                Ok(items) => Some(items),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed store");
                    None
                }
            })
            .unwrap_or_default();
        ScratchStore {
            path: path.to_path_buf(),
            items,
        }
    }

    /// Default location: `<data_local_dir>/darkroom/state.json`
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("darkroom")
            .join("state.json")
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|s| s.as_str())
    }

    /// Set a key and write the whole store back to disk atomically.
    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.into());
        self.flush()
    }

    /// The last map position submitted from the location form
    pub fn last_position(&self) -> Option<LatLng> {
        let raw = self.get_item(LASTPOS_KEY)?;
        serde_json::from_str::<LatLng>(raw)
            .ok()
            .filter(|p| p.is_valid())
    }

    pub fn remember_position(&mut self, pos: LatLng) -> Result<(), StoreError> {
        self.set_item(LASTPOS_KEY, pos.to_json())
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.items)?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let write_err = |source| StoreError::WriteError {
            path: self.path.clone(),
            source,
        };
        fs::create_dir_all(dir).map_err(write_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}
