//! Key-value storage media for the persisted connection record.

use crate::error::WalletResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Text values under string keys, surviving process restarts where the
/// medium allows it. Shaped after the browser's `localStorage`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> WalletResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> WalletResult<()>;
    fn remove_item(&self, key: &str) -> WalletResult<()>;
}

/// In-memory medium. Clones share the same map, so a clone outlives a
/// dropped store the way `localStorage` outlives a page.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> WalletResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> WalletResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> WalletResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
