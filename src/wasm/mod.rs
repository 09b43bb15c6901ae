//! WASM module: the kit in the browser
//!
//! Bridges the wallet-standard JS objects to the core without wrapping them:
//! every JS wallet object is held by reference and only called through its
//! declared features.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          WasmDappKit (JS API)           │
//! │  mount, connect, disconnect, sign, ...  │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │            DappKit (core)               │
//! │  store + connection operations          │
//! └──────┬──────────────────┬───────────────┘
//!        │                  │
//! ┌──────▼───────┐  ┌───────▼──────────────┐
//! │  JsRegistry  │  │  JsWalletBackend     │
//! │ getWallets() │  │ features[...] calls  │
//! └──────────────┘  └──────────────────────┘
//!
//! LocalStorage ── last connection     browser_signals ── mobile policy
//! ```

mod environment;
mod kit;
mod registry;
mod storage;
mod wallet;

pub use environment::browser_signals;
pub use kit::WasmDappKit;
pub use registry::JsRegistry;
pub use storage::LocalStorage;
pub use wallet::{wallet_from_js, JsWalletBackend};

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

/// Serializer producing plain JS objects (not `Map`s).
pub(crate) fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| JsValue::from_str(&e.to_string()))
}
