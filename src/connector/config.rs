//! Connector configuration - passed from the host

use crate::core::keys::{PROVIDER_KEY, STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Reconcile accounts and network as soon as the wallet is detected.
    pub auto_connect: bool,
    pub storage_key: String,
    /// `window` property holding the injected provider (browser only).
    pub provider_key: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            auto_connect: false,
            storage_key: STORAGE_KEY.to_string(),
            provider_key: PROVIDER_KEY.to_string(),
        }
    }
}

impl ConnectorConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_auto_connect(mut self, enabled: bool) -> Self { self.auto_connect = enabled; self }
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self { self.storage_key = key.into(); self }
    pub fn with_provider_key(mut self, key: impl Into<String>) -> Self { self.provider_key = key.into(); self }

    /// Defaults overridden by `MINA_CONNECT_AUTO_CONNECT` and `MINA_CONNECT_STORAGE_KEY`.
    #[cfg(feature = "native")]
    pub fn from_env() -> Self {
        use crate::core::keys::env;

        let mut config = Self::default();
        if let Some(enabled) = std::env::var(env::AUTO_CONNECT).ok().as_deref().and_then(parse_flag) {
            config.auto_connect = enabled;
        }
        if let Ok(key) = std::env::var(env::STORAGE_KEY) {
            if !key.trim().is_empty() {
                config.storage_key = key.trim().to_string();
            }
        }
        config
    }
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConnectorConfig::default();
        assert!(!config.auto_connect);
        assert_eq!(config.storage_key, "mina-wallet-storage");
        assert_eq!(config.provider_key, "mina");
    }

    #[test]
    fn parse_flag_variants() {
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn from_env_overrides() {
        use crate::core::keys::env;
        use once_cell::sync::Lazy;
        use std::sync::Mutex;

        static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

        std::env::set_var(env::AUTO_CONNECT, "true");
        std::env::set_var(env::STORAGE_KEY, "my-dapp");
        let config = ConnectorConfig::from_env();
        std::env::remove_var(env::AUTO_CONNECT);
        std::env::remove_var(env::STORAGE_KEY);

        assert!(config.auto_connect);
        assert_eq!(config.storage_key, "my-dapp");
        assert_eq!(config.provider_key, "mina");
    }
}
