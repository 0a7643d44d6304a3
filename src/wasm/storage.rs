//! `window.localStorage` as a key-value medium.

use crate::error::{WalletError, WalletResult};
use crate::store::KeyValueStorage;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> WalletResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| WalletError::Storage("no window".into()))?;
        window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| WalletError::Storage("localStorage unavailable".into()))
    }
}

fn js_err(e: JsValue) -> WalletError {
    WalletError::Storage(format!("{:?}", e))
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> WalletResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_err)
    }

    fn set_item(&self, key: &str, value: &str) -> WalletResult<()> {
        self.storage()?.set_item(key, value).map_err(js_err)
    }

    fn remove_item(&self, key: &str) -> WalletResult<()> {
        self.storage()?.remove_item(key).map_err(js_err)
    }
}
