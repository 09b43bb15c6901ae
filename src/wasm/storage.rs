//! `window.localStorage` as connection storage

use crate::error::{DappKitError, Result};
use crate::storage::ConnectionStorage;
use wasm_bindgen::JsValue;

fn storage_error(e: JsValue) -> DappKitError {
    DappKitError::Storage(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Fails outside a window or when storage is blocked (private mode, sandbox).
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(DappKitError::MissingContext("window"))?;
        let storage = window
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| DappKitError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl ConnectionStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}
