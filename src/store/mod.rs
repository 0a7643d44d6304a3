//! Connection store: the last known wallet connection, persisted.
//!
//! ```text
//! ConnectionStore (Rc<RefCell<ConnectionSnapshot>>)
//!   │
//!   ├── mutators ──► save() ──► KeyValueStorage[key] = {"address","isConnected","networkID"}
//!   │
//!   └── load() ◄── KeyValueStorage[key]
//! ```
//!
//! `is_wallet_installed` lives only in memory; it is re-derived from the
//! provider on every start. Storage failures are reported to diagnostics and
//! never reach the caller.

mod storage;
#[cfg(feature = "native")]
mod file;

pub use storage::{KeyValueStorage, MemoryStorage};
#[cfg(feature = "native")]
pub use file::FileStorage;

use crate::core::keys::STORAGE_KEY;
use crate::diagnostics::{DiagnosticSink, Diagnostics};
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// The read model exposed to UI code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSnapshot {
    pub address: Option<String>,
    pub is_connected: bool,
    #[serde(rename = "networkID")]
    pub network_id: Option<String>,
    pub is_wallet_installed: bool,
}

impl ConnectionSnapshot {
    pub fn network(&self) -> Option<crate::core::network::Network> {
        self.network_id.as_deref().and_then(crate::core::network::Network::from_id)
    }
}

/// The persisted subset of [`ConnectionSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConnection {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default, rename = "networkID")]
    pub network_id: Option<String>,
}

impl From<&ConnectionSnapshot> for PersistedConnection {
    fn from(s: &ConnectionSnapshot) -> Self {
        Self {
            address: s.address.clone(),
            is_connected: s.is_connected,
            network_id: s.network_id.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ConnectionStore {
    state: Rc<RefCell<ConnectionSnapshot>>,
    storage: Rc<dyn KeyValueStorage>,
    key: String,
    diagnostics: Diagnostics,
}

impl ConnectionStore {
    /// Empty store over `storage`. Nothing is read until [`load`](Self::load).
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ConnectionSnapshot::default())),
            storage,
            key: STORAGE_KEY.to_string(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// `new` + `load` under the default key.
    pub fn open(storage: Rc<dyn KeyValueStorage>) -> Self {
        let store = Self::new(storage);
        store.load();
        store
    }

    /// Ephemeral store, mostly for tests and hosts without storage.
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_diagnostics(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Diagnostics::new(sink);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Restore the persisted fields. Returns whether a record was found.
    /// A missing or unreadable record leaves the snapshot empty.
    pub fn load(&self) -> bool {
        match self.read_record() {
            Ok(Some(record)) => {
                let mut state = self.state.borrow_mut();
                state.is_connected = record.is_connected && record.address.is_some();
                state.address = record.address;
                state.network_id = record.network_id;
                tracing::debug!(key = %self.key, connected = state.is_connected, "restored connection");
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.diagnostics.report("load", &e);
                false
            }
        }
    }

    fn read_record(&self) -> WalletResult<Option<PersistedConnection>> {
        match self.storage.get_item(&self.key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Write the persisted fields.
    pub fn save(&self) {
        let record = PersistedConnection::from(&*self.state.borrow());
        let result = serde_json::to_string(&record)
            .map_err(WalletError::from)
            .and_then(|text| self.storage.set_item(&self.key, &text));
        if let Err(e) = result {
            self.diagnostics.report("save", &e);
        }
    }

    /// The record currently in storage, if readable.
    pub fn persisted(&self) -> Option<PersistedConnection> {
        self.read_record().ok().flatten()
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub fn snapshot(&self) -> ConnectionSnapshot {
        self.state.borrow().clone()
    }

    pub fn address(&self) -> Option<String> {
        self.state.borrow().address.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected
    }

    pub fn network_id(&self) -> Option<String> {
        self.state.borrow().network_id.clone()
    }

    pub fn is_wallet_installed(&self) -> bool {
        self.state.borrow().is_wallet_installed
    }

    // =========================================================================
    // MUTATORS
    // =========================================================================

    pub fn set_network_id(&self, network_id: Option<String>) {
        self.state.borrow_mut().network_id = network_id;
        self.save();
    }

    /// In-memory only.
    pub fn set_is_wallet_installed(&self, installed: bool) {
        self.state.borrow_mut().is_wallet_installed = installed;
    }

    /// Joint update. `is_connected` without an address is stored as false.
    pub fn set_connection_state(&self, address: Option<String>, is_connected: bool) {
        {
            let mut state = self.state.borrow_mut();
            state.is_connected = is_connected && address.is_some();
            state.address = address;
        }
        self.save();
    }

    /// Clear address, connection and network. Installed flag is kept.
    pub fn reset_store(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.address = None;
            state.is_connected = false;
            state.network_id = None;
        }
        self.save();
    }

    /// Staleness check: drop the connection when the stored address is no
    /// longer among `current_accounts`. Network is left alone.
    pub fn validate_and_update_connection(&self, current_accounts: &[String]) {
        let stale = {
            let state = self.state.borrow();
            match (&state.address, state.is_connected) {
                (Some(address), true) => !current_accounts.iter().any(|a| a == address),
                _ => false,
            }
        };
        if stale {
            tracing::debug!(key = %self.key, "stored account no longer authorized");
            self.set_connection_state(None, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;

    const ADDR: &str = "B62qjVL9RjmmaD4yh9V3fGFkJ5VDWkjAkqF3W3F7t8FU2jTT6wxPZ9s";
    const OTHER: &str = "B62qkYa1o6Mj6uTTjDQCob7FYZspuhkm4RRQhgJg9j4koEBWiSrTQrS";

    fn connected_store() -> ConnectionStore {
        let store = ConnectionStore::in_memory();
        store.set_connection_state(Some(ADDR.into()), true);
        store.set_network_id(Some("mina:devnet".into()));
        store
    }

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _: &str) -> WalletResult<Option<String>> {
            Err(WalletError::Storage("quota".into()))
        }
        fn set_item(&self, _: &str, _: &str) -> WalletResult<()> {
            Err(WalletError::Storage("quota".into()))
        }
        fn remove_item(&self, _: &str) -> WalletResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let store = ConnectionStore::open(Rc::new(MemoryStorage::new()));
        assert_eq!(store.snapshot(), ConnectionSnapshot::default());
    }

    #[test]
    fn test_reset_is_idempotent_and_keeps_installed() {
        let store = connected_store();
        store.set_is_wallet_installed(true);

        store.reset_store();
        let once = store.snapshot();
        store.reset_store();
        let twice = store.snapshot();

        assert_eq!(once, twice);
        assert_eq!(once.address, None);
        assert!(!once.is_connected);
        assert_eq!(once.network_id, None);
        assert!(once.is_wallet_installed);
    }

    #[test]
    fn test_stale_address_cleared_network_kept() {
        let store = connected_store();
        store.validate_and_update_connection(&[OTHER.to_string()]);
        let snap = store.snapshot();
        assert_eq!(snap.address, None);
        assert!(!snap.is_connected);
        assert_eq!(snap.network_id.as_deref(), Some("mina:devnet"));
    }

    #[test]
    fn test_live_address_left_unchanged() {
        let store = connected_store();
        let before = store.snapshot();
        store.validate_and_update_connection(&[OTHER.to_string(), ADDR.to_string()]);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_staleness_noop_when_disconnected() {
        let store = ConnectionStore::in_memory();
        store.set_connection_state(Some(ADDR.into()), false);
        let before = store.snapshot();
        store.validate_and_update_connection(&[]);
        assert_eq!(store.snapshot(), before);
        store.validate_and_update_connection(&[OTHER.to_string()]);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_load_drops_connected_flag_without_address() {
        let storage = MemoryStorage::new();
        storage
            .set_item(STORAGE_KEY, r#"{"isConnected":true,"networkID":"mina:devnet"}"#)
            .unwrap();

        let store = ConnectionStore::open(Rc::new(storage));
        let snap = store.snapshot();
        assert_eq!(snap.address, None);
        assert!(!snap.is_connected);
        assert_eq!(snap.network_id.as_deref(), Some("mina:devnet"));
    }

    #[test]
    fn test_connected_requires_address() {
        let store = ConnectionStore::in_memory();
        store.set_connection_state(None, true);
        assert!(!store.is_connected());
    }

    #[test]
    fn test_persists_without_installed_flag() {
        let storage = MemoryStorage::new();
        let store = ConnectionStore::open(Rc::new(storage.clone()));
        store.set_is_wallet_installed(true);
        store.set_connection_state(Some(ADDR.into()), true);
        store.set_network_id(Some("mina:mainnet".into()));

        let raw = storage.get_item(STORAGE_KEY).unwrap().expect("record");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["address"], ADDR);
        assert_eq!(value["isConnected"], true);
        assert_eq!(value["networkID"], "mina:mainnet");
        assert!(value.get("isWalletInstalled").is_none());

        let restored = ConnectionStore::open(Rc::new(storage));
        let snap = restored.snapshot();
        assert_eq!(snap.address.as_deref(), Some(ADDR));
        assert!(snap.is_connected);
        assert!(!snap.is_wallet_installed);
    }

    #[test]
    fn test_storage_failures_are_reported_not_raised() {
        let sink = MemorySink::new();
        let store = ConnectionStore::new(Rc::new(BrokenStorage))
            .with_diagnostics(Rc::new(sink.clone()));

        assert!(!store.load());
        store.set_connection_state(Some(ADDR.into()), true);

        assert_eq!(store.address().as_deref(), Some(ADDR));
        assert_eq!(sink.contexts(), vec!["load".to_string(), "save".to_string()]);
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let store = ConnectionStore::new(Rc::new(storage.clone())).with_key("other-app");
        store.set_network_id(Some("mina:devnet".into()));
        assert!(storage.get_item("other-app").unwrap().is_some());
        assert!(storage.get_item(STORAGE_KEY).unwrap().is_none());
    }
}
