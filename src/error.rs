//! Error types and the recovered-result wrapper.
//!
//! Only [`WalletError::InvalidInput`] is ever surfaced to callers. Every other
//! failure is reported to a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink)
//! and replaced with a benign default, carried back as an [`Outcome`].

use thiserror::Error;

pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Malformed address handed to the formatter.
    #[error("invalid address: {0:?}")]
    InvalidInput(String),

    #[error("wallet provider not installed")]
    ProviderMissing,

    #[error("provider call `{method}` failed: {message}")]
    Provider { method: &'static str, message: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl WalletError {
    pub fn provider(method: &'static str, message: impl ToString) -> Self {
        WalletError::Provider { method, message: message.to_string() }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::Storage(e.to_string())
    }
}

/// A value that is always usable, possibly a fallback standing in for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    Recovered { value: T, cause: WalletError },
}

impl<T> Outcome<T> {
    pub fn recovered(value: T, cause: WalletError) -> Self {
        Outcome::Recovered { value, cause }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok(value) | Outcome::Recovered { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Ok(value) | Outcome::Recovered { value, .. } => value,
        }
    }

    pub fn cause(&self) -> Option<&WalletError> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Recovered { cause, .. } => Some(cause),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Outcome::Recovered { .. })
    }
}
