//! `window.mina` behind the `WalletProvider` trait.
//!
//! Methods are looked up by name on the injected object and called with
//! `Function::apply`; promise results are awaited. Some wallet builds resolve
//! with a `{code, message}` error object instead of rejecting, so every
//! response is decoded with serde and a decode failure becomes a provider
//! error carrying the object's `message`.

use crate::core::keys::events::ACCOUNTS_CHANGED;
use crate::core::keys::methods;
use crate::error::{WalletError, WalletResult};
use crate::provider::{AccountsHandler, NetworkInfo, ProviderEnv, SubscriptionId, WalletProvider};
use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

type Listener = Closure<dyn FnMut(JsValue)>;

pub struct InjectedProvider {
    object: Object,
    listeners: RefCell<HashMap<SubscriptionId, Listener>>,
    next_id: Cell<u32>,
}

impl InjectedProvider {
    pub fn new(object: Object) -> Self {
        Self {
            object,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    fn function(&self, method: &'static str) -> WalletResult<Function> {
        let value = Reflect::get(&self.object, &JsValue::from_str(method))
            .map_err(|e| WalletError::provider(method, format!("{:?}", e)))?;
        value
            .dyn_into::<Function>()
            .map_err(|_| WalletError::provider(method, "not a function"))
    }

    fn call_sync(&self, method: &'static str, args: &[&JsValue]) -> WalletResult<JsValue> {
        let function = self.function(method)?;
        let args: Array = args.iter().copied().collect();
        function
            .apply(&self.object, &args)
            .map_err(|e| WalletError::provider(method, error_message(&e)))
    }

    async fn call(&self, method: &'static str) -> WalletResult<JsValue> {
        let result = self.call_sync(method, &[])?;
        if result.has_type::<Promise>() {
            let promise: Promise = result.unchecked_into();
            JsFuture::from(promise)
                .await
                .map_err(|e| WalletError::provider(method, error_message(&e)))
        } else {
            Ok(result)
        }
    }

    async fn accounts(&self, method: &'static str) -> WalletResult<Vec<String>> {
        let value = self.call(method).await?;
        serde_wasm_bindgen::from_value(value.clone())
            .map_err(|_| WalletError::provider(method, error_message(&value)))
    }
}

/// `message` of an error-like object, else its debug form.
fn error_message(value: &JsValue) -> String {
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn get_accounts(&self) -> WalletResult<Vec<String>> {
        self.accounts(methods::GET_ACCOUNTS).await
    }

    async fn request_accounts(&self) -> WalletResult<Vec<String>> {
        self.accounts(methods::REQUEST_ACCOUNTS).await
    }

    async fn request_network(&self) -> WalletResult<Option<NetworkInfo>> {
        let value = self.call(methods::REQUEST_NETWORK).await?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(value.clone())
            .map(Some)
            .map_err(|_| WalletError::provider(methods::REQUEST_NETWORK, error_message(&value)))
    }

    fn on(&self, event: &str, handler: AccountsHandler) -> WalletResult<SubscriptionId> {
        // An undecodable payload is passed on as an error, never as an empty list.
        let listener: Listener = Closure::new(move |value: JsValue| {
            let accounts = serde_wasm_bindgen::from_value::<Vec<String>>(value.clone())
                .map_err(|_| WalletError::provider(ACCOUNTS_CHANGED, error_message(&value)));
            handler(accounts);
        });
        self.call_sync(methods::ON, &[&JsValue::from_str(event), listener.as_ref()])?;

        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, listener);
        Ok(id)
    }

    fn remove_listener(&self, event: &str, id: SubscriptionId) -> WalletResult<()> {
        let listener = self
            .listeners
            .borrow_mut()
            .remove(&id)
            .ok_or_else(|| WalletError::provider(methods::REMOVE_LISTENER, format!("unknown listener {}", id.0)))?;
        self.call_sync(methods::REMOVE_LISTENER, &[&JsValue::from_str(event), listener.as_ref()])?;
        Ok(())
    }
}

/// Looks the provider up on `window` on every `detect` call.
#[derive(Debug, Clone)]
pub struct WindowEnv {
    provider_key: String,
}

impl WindowEnv {
    pub fn new(provider_key: impl Into<String>) -> Self {
        Self { provider_key: provider_key.into() }
    }
}

impl ProviderEnv for WindowEnv {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>> {
        let window = web_sys::window()?;
        let value = Reflect::get(&window, &JsValue::from_str(&self.provider_key)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let object = value.dyn_into::<Object>().ok()?;
        Some(Rc::new(InjectedProvider::new(object)))
    }
}
