//! The injected wallet provider, seen from Rust.
//!
//! The extension object is an external collaborator. [`WalletProvider`] is the
//! surface this crate relies on, [`ProviderEnv`] answers "is it installed right
//! now", and [`Subscription`] ties an event listener's lifetime to a value.

pub mod mock;

use crate::diagnostics::Diagnostics;
use crate::error::WalletResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Callback receiving the new account list of an `accountsChanged` event, or
/// the decode error when the payload was not a list of strings.
pub type AccountsHandler = Rc<dyn Fn(WalletResult<Vec<String>>)>;

/// Handle returned by [`WalletProvider::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u32);

/// Response of `requestNetwork`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    #[serde(rename = "networkID")]
    pub network_id: String,
}

impl NetworkInfo {
    pub fn new(network_id: impl Into<String>) -> Self {
        Self { network_id: network_id.into() }
    }
}

#[async_trait(?Send)]
pub trait WalletProvider {
    /// Accounts already authorized for this origin. No prompt.
    async fn get_accounts(&self) -> WalletResult<Vec<String>>;

    /// Prompts the user to authorize an account.
    async fn request_accounts(&self) -> WalletResult<Vec<String>>;

    async fn request_network(&self) -> WalletResult<Option<NetworkInfo>>;

    fn on(&self, event: &str, handler: AccountsHandler) -> WalletResult<SubscriptionId>;

    fn remove_listener(&self, event: &str, id: SubscriptionId) -> WalletResult<()>;
}

/// Probe for the provider in the execution environment.
pub trait ProviderEnv {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>>;
}

/// An environment where no wallet is ever installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProvider;

impl ProviderEnv for NoProvider {
    fn detect(&self) -> Option<Rc<dyn WalletProvider>> {
        None
    }
}

/// A registered listener. Dropping it removes the listener from the provider.
/// A failed removal is reported under the `"unsubscribe"` context.
pub struct Subscription {
    provider: Rc<dyn WalletProvider>,
    event: &'static str,
    id: SubscriptionId,
    diagnostics: Diagnostics,
}

impl Subscription {
    pub fn subscribe(
        provider: Rc<dyn WalletProvider>,
        event: &'static str,
        handler: AccountsHandler,
    ) -> WalletResult<Self> {
        Self::subscribe_reporting(provider, event, handler, Diagnostics::default())
    }

    pub(crate) fn subscribe_reporting(
        provider: Rc<dyn WalletProvider>,
        event: &'static str,
        handler: AccountsHandler,
        diagnostics: Diagnostics,
    ) -> WalletResult<Self> {
        let id = provider.on(event, handler)?;
        tracing::debug!(event, id = id.0, "listener registered");
        Ok(Self { provider, event, id, diagnostics })
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn event(&self) -> &'static str {
        self.event
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        match self.provider.remove_listener(self.event, self.id) {
            Ok(()) => tracing::debug!(event = self.event, id = self.id.0, "listener removed"),
            Err(e) => self.diagnostics.report("unsubscribe", &e),
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}
