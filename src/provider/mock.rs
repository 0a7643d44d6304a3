//! Scriptable in-process provider and environment.
//!
//! Used by the test suites and by hosts that want to exercise the connector
//! without a browser extension.

use super::{AccountsHandler, NetworkInfo, ProviderEnv, SubscriptionId, WalletProvider};
use crate::core::keys::methods;
use crate::error::{WalletError, WalletResult};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

pub struct MockProvider {
    accounts: RefCell<WalletResult<Vec<String>>>,
    requested: RefCell<WalletResult<Vec<String>>>,
    network: RefCell<WalletResult<Option<NetworkInfo>>>,
    listeners: RefCell<BTreeMap<SubscriptionId, (String, AccountsHandler)>>,
    remove_error: RefCell<Option<String>>,
    accounts_gate: RefCell<Option<oneshot::Receiver<()>>>,
    next_id: Cell<u32>,
    calls: RefCell<HashMap<&'static str, usize>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// No authorized accounts, no network.
    pub fn new() -> Self {
        Self {
            accounts: RefCell::new(Ok(Vec::new())),
            requested: RefCell::new(Ok(Vec::new())),
            network: RefCell::new(Ok(None)),
            listeners: RefCell::new(BTreeMap::new()),
            remove_error: RefCell::new(None),
            accounts_gate: RefCell::new(None),
            next_id: Cell::new(1),
            calls: RefCell::new(HashMap::new()),
        }
    }

    /// `getAccounts` and `requestAccounts` both answer `accounts`.
    pub fn with_accounts(self, accounts: &[&str]) -> Self {
        self.set_accounts(accounts);
        self.set_requested(accounts);
        self
    }

    pub fn with_network(self, network_id: &str) -> Self {
        self.set_network(Some(network_id));
        self
    }

    pub fn set_accounts(&self, accounts: &[&str]) {
        *self.accounts.borrow_mut() = Ok(to_owned(accounts));
    }

    pub fn set_requested(&self, accounts: &[&str]) {
        *self.requested.borrow_mut() = Ok(to_owned(accounts));
    }

    pub fn set_network(&self, network_id: Option<&str>) {
        *self.network.borrow_mut() = Ok(network_id.map(NetworkInfo::new));
    }

    pub fn fail_get_accounts(&self, message: &str) {
        *self.accounts.borrow_mut() = Err(WalletError::provider(methods::GET_ACCOUNTS, message));
    }

    pub fn fail_request_accounts(&self, message: &str) {
        *self.requested.borrow_mut() = Err(WalletError::provider(methods::REQUEST_ACCOUNTS, message));
    }

    pub fn fail_request_network(&self, message: &str) {
        *self.network.borrow_mut() = Err(WalletError::provider(methods::REQUEST_NETWORK, message));
    }

    /// `removeListener` fails with `message` and keeps the listener.
    pub fn fail_remove_listener(&self, message: &str) {
        *self.remove_error.borrow_mut() = Some(message.to_string());
    }

    /// The next `getAccounts` stays pending until the returned sender fires
    /// or is dropped.
    pub fn hold_get_accounts(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.accounts_gate.borrow_mut() = Some(gate);
        release
    }

    /// Fire `event` at every listener registered for it.
    pub fn emit(&self, event: &str, accounts: Vec<String>) {
        self.dispatch(event, Ok(accounts));
    }

    /// Fire `event` with a payload the provider could not decode.
    pub fn emit_malformed(&self, event: &'static str, message: &str) {
        self.dispatch(event, Err(WalletError::provider(event, message)));
    }

    fn dispatch(&self, event: &str, payload: WalletResult<Vec<String>>) {
        let handlers: Vec<AccountsHandler> = self
            .listeners
            .borrow()
            .values()
            .filter(|(name, _)| name == event)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(payload.clone());
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.borrow().values().filter(|(name, _)| name == event).count()
    }

    /// How many times `method` (a name from `keys::methods`) was called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.borrow().get(method).copied().unwrap_or(0)
    }

    fn record(&self, method: &'static str) {
        *self.calls.borrow_mut().entry(method).or_insert(0) += 1;
    }
}

fn to_owned(accounts: &[&str]) -> Vec<String> {
    accounts.iter().map(|a| a.to_string()).collect()
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn get_accounts(&self) -> WalletResult<Vec<String>> {
        self.record(methods::GET_ACCOUNTS);
        let gate = self.accounts_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.accounts.borrow().clone()
    }

    async fn request_accounts(&self) -> WalletResult<Vec<String>> {
        self.record(methods::REQUEST_ACCOUNTS);
        self.requested.borrow().clone()
    }

    async fn request_network(&self) -> WalletResult<Option<NetworkInfo>> {
        self.record(methods::REQUEST_NETWORK);
        self.network.borrow().clone()
    }

    fn on(&self, event: &str, handler: AccountsHandler) -> WalletResult<SubscriptionId> {
        self.record(methods::ON);
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, (event.to_string(), handler));
        Ok(id)
    }

    fn remove_listener(&self, event: &str, id: SubscriptionId) -> WalletResult<()> {
        self.record(methods::REMOVE_LISTENER);
        if let Some(message) = self.remove_error.borrow().as_deref() {
            return Err(WalletError::provider(methods::REMOVE_LISTENER, message));
        }
        let mut listeners = self.listeners.borrow_mut();
        let known = matches!(listeners.get(&id), Some((name, _)) if name == event);
        if !known {
            return Err(WalletError::provider(methods::REMOVE_LISTENER, format!("unknown listener {}", id.0)));
        }
        listeners.remove(&id);
        Ok(())
    }
}

/// Environment whose provider can be installed and removed at will.
#[derive(Default, Clone)]
pub struct MockEnv {
    provider: Rc<RefCell<Option<Rc<MockProvider>>>>,
}

impl MockEnv {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: Rc<MockProvider>) -> Self {
        let env = Self::default();
        env.install(provider);
        env
    }

    pub fn install(&self, provider: Rc<MockProvider>) {
        *self.provider.borrow_mut() = Some(provider);
    }

    pub fn uninstall(&self) {
        *self.provider.borrow_mut() = None;
    }
}

impl ProviderEnv for MockEnv {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>> {
        self.provider
            .borrow()
            .clone()
            .map(|p| p as Rc<dyn WalletProvider>)
    }
}
