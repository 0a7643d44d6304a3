//! mina-connect: the browser-injected Mina wallet as a small Rust library.
//!
//! # Architecture
//!
//! ```text
//! WalletConnector (entry point)
//!   │
//!   ├── ProviderEnv ──► WalletProvider (window.mina / MockProvider)
//!   │                     └── Subscription (accountsChanged, released on drop)
//!   │
//!   ├── ConnectionStore (snapshot + persistence)
//!   │     └── KeyValueStorage (localStorage / FileStorage / MemoryStorage)
//!   │
//!   └── DiagnosticSink (silenced failures)
//!
//! core::address (validate / format)    core::network (tags)
//! ```
//!
//! # Operations
//!
//! | Operation | Method | Description |
//! |-----------|--------|-------------|
//! | validate | `validate_address(s)` | Prefix, length and alphabet check |
//! | format | `format_address(s)` | `B62qjV...PZ9s`, errors on invalid input |
//! | check | `connector.check()` | Detect the wallet, subscribe, reconcile |
//! | connect | `connector.trigger_connect()` | Prompt for an account |
//! | disconnect | `connector.disconnect()` | Forget the connection locally |
//! | read | `connector.snapshot()` | `{address, isConnected, networkID, isWalletInstalled}` |
//!
//! # Features
//!
//! - `native` - File-backed storage, tracing subscriber, CLI
//! - `wasm` - `window.mina` provider, `localStorage`, JS bindings
//!
//! # Usage
//!
//! ```ignore
//! use mina_connect::{ConnectionStore, ConnectorConfig, FileStorage, WalletConnector};
//!
//! let store = ConnectionStore::open(Rc::new(FileStorage::open_default()?));
//! let connector = WalletConnector::new(env, store, ConnectorConfig::new().with_auto_connect(true));
//!
//! connector.check().await;
//! let address = connector.trigger_connect().await.into_value();
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod connector;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod store;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, localStorage, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use connector::{Availability, ConnectorConfig, WalletConnector};
pub use crate::core::address::{format_address, validate_address};
pub use crate::core::network::Network;
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use error::{Outcome, WalletError, WalletResult};
pub use provider::{NetworkInfo, NoProvider, ProviderEnv, Subscription, SubscriptionId, WalletProvider};
pub use store::{ConnectionSnapshot, ConnectionStore, KeyValueStorage, MemoryStorage, PersistedConnection};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use store::FileStorage;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{InjectedProvider, LocalStorage, MinaConnect, WindowEnv};
