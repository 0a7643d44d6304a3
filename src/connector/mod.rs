//! WalletConnector: keeps the connection store in sync with the provider.
//!
//! # Lifecycle
//!
//! ```text
//!             check()                    check()
//! Unchecked ───────────► Installed ◄──────────────── (no-op while installed)
//!     │                     │
//!     │ check()             │ on entry:
//!     ▼                     │   1. installed = true
//! NotInstalled              │   2. subscribe accountsChanged
//!   installed = false       │   3. revalidate restored connection
//!   no listener             │   4. auto-connect (accounts ∥ network)
//!                           ▼
//!                 teardown() / drop: listener removed, back to Unchecked
//! ```
//!
//! `trigger_connect` and `disconnect` are independent of the lifecycle.
//! Provider failures never escape: they are reported to the diagnostic sink
//! and the affected field keeps its previous value.

mod config;

pub use config::ConnectorConfig;
#[cfg(feature = "native")]
pub(crate) use config::parse_flag;

use crate::core::address::validate_address;
use crate::core::keys::events::ACCOUNTS_CHANGED;
use crate::diagnostics::{DiagnosticSink, Diagnostics};
use crate::error::{Outcome, WalletError, WalletResult};
use crate::provider::{AccountsHandler, ProviderEnv, Subscription, WalletProvider};
use crate::store::{ConnectionSnapshot, ConnectionStore};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Provider availability as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Unchecked,
    NotInstalled,
    Installed,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Unchecked => "unchecked",
            Availability::NotInstalled => "not_installed",
            Availability::Installed => "installed",
        }
    }
}

pub struct WalletConnector {
    env: Rc<dyn ProviderEnv>,
    store: ConnectionStore,
    config: ConnectorConfig,
    diagnostics: Diagnostics,
    phase: Cell<Availability>,
    subscription: RefCell<Option<Subscription>>,
}

impl WalletConnector {
    /// The store's key wins over `config.storage_key`; the config is
    /// rewritten to match so `config()` describes the record actually used.
    pub fn new(env: Rc<dyn ProviderEnv>, store: ConnectionStore, mut config: ConnectorConfig) -> Self {
        if config.storage_key != store.key() {
            tracing::warn!(config = %config.storage_key, store = store.key(), "storage key mismatch, using the store's");
            config.storage_key = store.key().to_string();
        }
        Self {
            env,
            store,
            config,
            diagnostics: Diagnostics::default(),
            phase: Cell::new(Availability::Unchecked),
            subscription: RefCell::new(None),
        }
    }

    pub fn with_diagnostics(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Diagnostics::new(sink);
        self
    }

    pub fn store(&self) -> &ConnectionStore {
        &self.store
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ConnectionSnapshot {
        self.store.snapshot()
    }

    pub fn phase(&self) -> Availability {
        self.phase.get()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Probe for the provider and run the entry actions of the new phase.
    /// Call on mount and whenever the installed flag may have changed.
    pub async fn check(&self) -> Availability {
        match self.env.detect() {
            None => self.enter_not_installed(),
            Some(_) if self.phase.get() == Availability::Installed => {}
            Some(provider) => self.enter_installed(provider).await,
        }
        self.phase.get()
    }

    /// Release the listener. The next `check` starts over from `Unchecked`.
    pub fn teardown(&self) {
        self.release();
        self.phase.set(Availability::Unchecked);
    }

    fn release(&self) {
        // Dropping the subscription removes the provider listener.
        let released = self.subscription.borrow_mut().take();
        drop(released);
    }

    fn enter_not_installed(&self) {
        if self.phase.get() != Availability::NotInstalled {
            tracing::debug!(from = self.phase.get().as_str(), "wallet not installed");
        }
        self.release();
        self.phase.set(Availability::NotInstalled);
        self.store.set_is_wallet_installed(false);
    }

    async fn enter_installed(&self, provider: Rc<dyn WalletProvider>) {
        tracing::debug!(from = self.phase.get().as_str(), auto_connect = self.config.auto_connect, "wallet installed");
        // Set before any await so a concurrent check does not enter twice.
        self.phase.set(Availability::Installed);
        self.store.set_is_wallet_installed(true);

        self.listen(provider.clone());

        let restored = self.store.snapshot();
        if restored.is_connected && restored.address.is_some() {
            self.revalidate(provider.as_ref()).await;
        }

        if self.config.auto_connect {
            self.auto_connect(provider.as_ref()).await;
        }
    }

    fn listen(&self, provider: Rc<dyn WalletProvider>) {
        let store = self.store.clone();
        let diagnostics = self.diagnostics.clone();
        let handler: AccountsHandler = Rc::new(move |accounts: WalletResult<Vec<String>>| match accounts {
            Ok(accounts) => apply_accounts(&store, accounts),
            Err(e) => diagnostics.report("accounts_changed", &e),
        });
        match Subscription::subscribe_reporting(provider, ACCOUNTS_CHANGED, handler, self.diagnostics.clone()) {
            Ok(subscription) => *self.subscription.borrow_mut() = Some(subscription),
            Err(e) => self.diagnostics.report("subscribe", &e),
        }
    }

    /// Staleness check of a restored connection. If the live accounts cannot
    /// be fetched the connection cannot be confirmed and the store is cleared.
    async fn revalidate(&self, provider: &dyn WalletProvider) {
        match provider.get_accounts().await {
            Ok(accounts) => self.store.validate_and_update_connection(&accounts),
            Err(e) => {
                self.diagnostics.report("revalidate", &e);
                self.store.reset_store();
            }
        }
    }

    /// Accounts and network are fetched concurrently; each failure only
    /// leaves its own field untouched.
    async fn auto_connect(&self, provider: &dyn WalletProvider) {
        let accounts = async {
            match provider.get_accounts().await {
                Ok(accounts) => apply_accounts(&self.store, accounts),
                Err(e) => self.diagnostics.report("auto_connect.accounts", &e),
            }
        };
        let network = async {
            match provider.request_network().await {
                Ok(Some(info)) => self.store.set_network_id(Some(info.network_id)),
                Ok(None) => {}
                Err(e) => self.diagnostics.report("auto_connect.network", &e),
            }
        };
        futures::join!(accounts, network);
    }

    // =========================================================================
    // USER OPERATIONS
    // =========================================================================

    /// Ask the wallet to authorize an account. Resolves to the connected
    /// address, or `None` when the wallet is missing, declines, or fails.
    /// The store is only written on success.
    pub async fn trigger_connect(&self) -> Outcome<Option<String>> {
        let Some(provider) = self.env.detect() else {
            let cause = WalletError::ProviderMissing;
            self.diagnostics.report("trigger_connect", &cause);
            return Outcome::recovered(None, cause);
        };

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(address) => {
                    warn_if_malformed(&address);
                    self.store.set_connection_state(Some(address.clone()), true);
                    Outcome::Ok(Some(address))
                }
                None => Outcome::Ok(None),
            },
            Err(e) => {
                self.diagnostics.report("trigger_connect", &e);
                Outcome::recovered(None, e)
            }
        }
    }

    /// Forget the connection locally. The provider is not asked to revoke
    /// anything and the installed flag is kept.
    pub fn disconnect(&self) {
        self.store.reset_store();
    }
}

impl Drop for WalletConnector {
    fn drop(&mut self) {
        self.release();
    }
}

/// Handler body for `accountsChanged`, also used by auto-connect.
fn apply_accounts(store: &ConnectionStore, accounts: Vec<String>) {
    match accounts.into_iter().next() {
        Some(first) => {
            warn_if_malformed(&first);
            store.set_connection_state(Some(first), true);
        }
        None => store.set_connection_state(None, false),
    }
}

/// Provider-reported addresses are trusted; a malformed one is only logged.
fn warn_if_malformed(address: &str) {
    if !validate_address(address) {
        tracing::warn!(address, "provider reported a malformed address");
    }
}
