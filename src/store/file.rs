//! File-backed storage for native hosts: one JSON file per key.

use super::storage::KeyValueStorage;
use crate::core::keys::env;
use crate::error::{WalletError, WalletResult};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "mina-connect";

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$MINA_CONNECT_ROOT`, else `<data_dir>/mina-connect`.
    pub fn default_dir() -> WalletResult<PathBuf> {
        if let Ok(root) = std::env::var(env::ROOT) {
            if !root.trim().is_empty() {
                return Ok(PathBuf::from(root));
            }
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| WalletError::Storage("no data directory on this platform".into()))
    }

    pub fn open_default() -> WalletResult<Self> {
        Ok(Self::new(Self::default_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> WalletResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(WalletError::Storage(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> WalletResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> WalletResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        // Readers never see a partially written record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> WalletResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
