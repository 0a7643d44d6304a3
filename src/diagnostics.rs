//! Diagnostic sinks for silenced failures.
//!
//! The store and connector never propagate provider or storage failures.
//! They hand them to a sink instead, which keeps the core testable without
//! capturing log output.

use crate::core::keys::DIAGNOSTIC_TAG;
use crate::error::WalletError;
use std::cell::RefCell;
use std::rc::Rc;

pub trait DiagnosticSink {
    /// `context` names the operation that failed, e.g. `"trigger_connect"`.
    fn report(&self, tag: &'static str, context: &str, error: &WalletError);
}

/// Forwards to `tracing::warn!`. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, tag: &'static str, context: &str, error: &WalletError) {
        tracing::warn!(tag, context, error = %error, "wallet operation failed");
    }
}

/// One captured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub tag: &'static str,
    pub context: String,
    pub error: WalletError,
}

/// Keeps every report in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Rc<RefCell<Vec<Report>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn contexts(&self) -> Vec<String> {
        self.reports.borrow().iter().map(|r| r.context.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.reports.borrow_mut().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, tag: &'static str, context: &str, error: &WalletError) {
        self.reports.borrow_mut().push(Report {
            tag,
            context: context.to_string(),
            error: error.clone(),
        });
    }
}

/// Shared handle plus the fixed tag, so call sites only name the context.
#[derive(Clone)]
pub(crate) struct Diagnostics {
    sink: Rc<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub(crate) fn new(sink: Rc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub(crate) fn report(&self, context: &str, error: &WalletError) {
        self.sink.report(DIAGNOSTIC_TAG, context, error);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Rc::new(TracingSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_clones_share_reports() {
        let sink = MemorySink::new();
        let diagnostics = Diagnostics::new(Rc::new(sink.clone()));

        diagnostics.report("get_accounts", &WalletError::ProviderMissing);

        assert_eq!(sink.len(), 1);
        let report = &sink.reports()[0];
        assert_eq!(report.tag, DIAGNOSTIC_TAG);
        assert_eq!(report.context, "get_accounts");
        assert_eq!(report.error, WalletError::ProviderMissing);

        sink.clear();
        assert!(sink.is_empty());
    }
}
