//! MinaConnect: the connector exposed to JavaScript via wasm-bindgen
//!
//! ```javascript
//! import { MinaConnect, formatAddress } from 'mina-connect';
//!
//! const wallet = new MinaConnect({ autoConnect: true });
//! await wallet.check();
//! const address = await wallet.triggerConnect();
//! if (address) label.textContent = formatAddress(address);
//! ```

use super::{log, ConsoleSink, LocalStorage, WindowEnv};
use crate::connector::{ConnectorConfig, WalletConnector};
use crate::store::ConnectionStore;
use serde::Deserialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsOptions {
    auto_connect: Option<bool>,
    storage_key: Option<String>,
    provider_key: Option<String>,
}

fn options_from_js(value: JsValue) -> Result<ConnectorConfig, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(ConnectorConfig::default());
    }
    let options: JsOptions = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut config = ConnectorConfig::default();
    if let Some(enabled) = options.auto_connect {
        config = config.with_auto_connect(enabled);
    }
    if let Some(key) = options.storage_key {
        config = config.with_storage_key(key);
    }
    if let Some(key) = options.provider_key {
        config = config.with_provider_key(key);
    }
    Ok(config)
}

#[wasm_bindgen]
pub struct MinaConnect {
    inner: Rc<WalletConnector>,
}

#[wasm_bindgen]
impl MinaConnect {
    /// `options`: `{ autoConnect?, storageKey?, providerKey? }`, all optional.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MinaConnect, JsValue> {
        let config = options_from_js(options)?;
        log!("[MinaConnect] storage key {}, auto-connect {}", config.storage_key, config.auto_connect);

        let sink = Rc::new(ConsoleSink);
        let store = ConnectionStore::new(Rc::new(LocalStorage::new()))
            .with_key(config.storage_key.clone())
            .with_diagnostics(sink.clone());
        store.load();

        let env = Rc::new(WindowEnv::new(config.provider_key.clone()));
        let connector = WalletConnector::new(env, store, config).with_diagnostics(sink);
        Ok(Self { inner: Rc::new(connector) })
    }

    /// Probe for the wallet. Resolves to `"installed"` or `"not_installed"`.
    #[wasm_bindgen]
    pub async fn check(&self) -> String {
        let connector = self.inner.clone();
        connector.check().await.as_str().to_string()
    }

    /// `{ address, isConnected, networkID, isWalletInstalled }`
    #[wasm_bindgen]
    pub fn snapshot(&self) -> JsValue {
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
        use serde::Serialize;
        self.inner.snapshot().serialize(&serializer).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(getter)]
    pub fn address(&self) -> Option<String> {
        self.inner.store().address()
    }

    #[wasm_bindgen(getter, js_name = "isConnected")]
    pub fn is_connected(&self) -> bool {
        self.inner.store().is_connected()
    }

    #[wasm_bindgen(getter, js_name = "networkID")]
    pub fn network_id(&self) -> Option<String> {
        self.inner.store().network_id()
    }

    #[wasm_bindgen(getter, js_name = "isWalletInstalled")]
    pub fn is_wallet_installed(&self) -> bool {
        self.inner.store().is_wallet_installed()
    }

    /// Prompt for an account. Resolves to the address or `undefined`; never rejects.
    #[wasm_bindgen(js_name = "triggerConnect")]
    pub async fn trigger_connect(&self) -> Option<String> {
        let connector = self.inner.clone();
        connector.trigger_connect().await.into_value()
    }

    #[wasm_bindgen]
    pub fn disconnect(&self) {
        self.inner.disconnect();
    }

    /// Remove the `accountsChanged` listener. Call on unmount.
    #[wasm_bindgen]
    pub fn teardown(&self) {
        self.inner.teardown();
    }
}
