//! Fixed keys and names shared by every platform layer.

/// Storage record holding `{address, isConnected, networkID}`.
pub const STORAGE_KEY: &str = "mina-wallet-storage";

/// Property on `window` where the extension injects its provider.
pub const PROVIDER_KEY: &str = "mina";

/// Tag attached to every silenced failure.
pub const DIAGNOSTIC_TAG: &str = "mina-connect";

/// Provider event names
pub mod events {
    pub const ACCOUNTS_CHANGED: &str = "accountsChanged";
}

/// Provider method names, as they appear on the injected object
pub mod methods {
    pub const GET_ACCOUNTS: &str = "getAccounts";
    pub const REQUEST_ACCOUNTS: &str = "requestAccounts";
    pub const REQUEST_NETWORK: &str = "requestNetwork";
    pub const ON: &str = "on";
    pub const REMOVE_LISTENER: &str = "removeListener";
}

/// Environment variables read by the native layer
pub mod env {
    pub const ROOT: &str = "MINA_CONNECT_ROOT";
    pub const AUTO_CONNECT: &str = "MINA_CONNECT_AUTO_CONNECT";
    pub const STORAGE_KEY: &str = "MINA_CONNECT_STORAGE_KEY";
    pub const LOG_JSON: &str = "MINA_CONNECT_LOG_JSON";
}
