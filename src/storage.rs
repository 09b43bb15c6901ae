//! Key/value storage for the last connection
//!
//! The kit remembers `(wallet name, account address)` after a connect or an
//! account switch and forgets it on disconnect. Values are JSON strings so any
//! string store (browser `localStorage`, a file, a map) can back it.

use crate::error::{DappKitError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub trait ConnectionStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Record written under the configured storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConnection {
    pub wallet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_address: Option<String>,
}

impl PersistedConnection {
    pub fn new(wallet_name: impl Into<String>, account_address: Option<String>) -> Self {
        Self { wallet_name: wallet_name.into(), account_address }
    }

    pub fn load(storage: &dyn ConnectionStorage, key: &str) -> Result<Option<Self>> {
        match storage.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, storage: &dyn ConnectionStorage, key: &str) -> Result<()> {
        storage.set(key, &serde_json::to_string(self)?)
    }
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ConnectionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(DappKitError::Storage("empty key".into()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
