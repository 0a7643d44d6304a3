//! WASM module: the connector wired to the real browser
//!
//! Provides:
//! - InjectedProvider: `window.mina` behind the `WalletProvider` trait
//! - LocalStorage: `window.localStorage` behind `KeyValueStorage`
//! - MinaConnect: the JS-facing class (read model + connect/disconnect)
//! - ConsoleSink: silenced failures to `console.warn`
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          MinaConnect (JS API)           │
//! │  check, snapshot, triggerConnect,       │
//! │  disconnect, teardown                   │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │            WalletConnector              │
//! └───────┬─────────────────────────┬───────┘
//!         │                         │
//! ┌───────▼─────────┐     ┌─────────▼───────┐
//! │ InjectedProvider│     │  LocalStorage   │
//! │  window.mina    │     │  (persisted)    │
//! └─────────────────┘     └─────────────────┘
//! ```

mod connector;
mod provider;
mod storage;

pub use connector::MinaConnect;
pub use provider::{InjectedProvider, WindowEnv};
pub use storage::LocalStorage;

use crate::diagnostics::DiagnosticSink;
use crate::error::WalletError;
use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;

/// Diagnostic sink printing to `console.warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&self, tag: &'static str, context: &str, error: &WalletError) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("[{}] {}: {}", tag, context, error)));
    }
}

/// `validateAddress(value)`: false for anything that is not a valid address
/// string, including `null` and `undefined`.
#[wasm_bindgen(js_name = "validateAddress")]
pub fn validate_address_js(value: &JsValue) -> bool {
    value
        .as_string()
        .map(|s| crate::core::address::validate_address(&s))
        .unwrap_or(false)
}

/// `formatAddress(address)`: throws on invalid input.
#[wasm_bindgen(js_name = "formatAddress")]
pub fn format_address_js(address: &JsValue) -> Result<String, JsValue> {
    let address = address.as_string().unwrap_or_default();
    crate::core::address::format_address(&address).map_err(|e| JsValue::from_str(&e.to_string()))
}
