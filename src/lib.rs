//! Dappkit: wallet discovery and connection state for browser dApps.
//!
//! # Architecture
//!
//! ```text
//! DappKit (entry point)
//!   │
//!   ├── WalletStore (single source of truth)
//!   │     └── status, wallets, accounts, current wallet/account, intents
//!   │
//!   ├── WalletDetection (registry watcher)
//!   │     └── WalletRegistry ──▶ selector (filter + order) ──▶ store
//!   │
//!   ├── ConnectionStorage (last connection, auto-connect)
//!   │
//!   └── ClientContext (injected request executor)
//! ```
//!
//! # Operations
//!
//! | Operation | Method | Description |
//! |-----------|--------|-------------|
//! | connect | `kit.connect(args)` | Connect a wallet and select an account |
//! | disconnect | `kit.disconnect()` | Disconnect and clear the connection |
//! | switch | `kit.switch_account(&account)` | Select another connected account |
//! | sign | `kit.sign_transaction(args)` | Sign without executing |
//! | execute | `kit.sign_and_execute_transaction(args)` | Sign and submit |
//! | message | `kit.sign_personal_message(msg)` | Sign arbitrary bytes |
//! | auto | `kit.auto_connect()` | Silently restore the last connection |
//!
//! # Features
//!
//! - `native` - Native log output (`logging::init_logging`)
//! - `wasm` - Browser bindings (wallet-standard bridge, localStorage, JS API)
//!
//! # Usage
//!
//! ```ignore
//! use dappkit::{DappKit, DappKitConfig, MemoryRegistry};
//! use std::rc::Rc;
//!
//! let kit = DappKit::new(DappKitConfig::new("myapp").with_preferred_wallets(["Slush"]));
//! let registry = Rc::new(MemoryRegistry::new());
//! let _detection = kit.detect(registry.clone(), None);
//!
//! let wallet = kit.store().wallets()[0].clone();
//! let connected = kit.connect(wallet).await?;
//! let signed = kit.sign_personal_message("hello").await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod client;
pub mod config;
pub mod connection;
pub mod core;
pub mod error;
pub mod registry;
pub mod selector;
pub mod storage;
pub mod store;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use client::{create_network_config, ClientContext, NetworkConfig, RequestExecutor};
pub use config::DappKitConfig;
pub use connection::{
    AutoConnectStatus, ConnectArgs, ConnectResult, DappKit, DisconnectHook, SignPersonalMessageArgs,
    SignTransactionArgs, WalletDetection,
};
pub use crate::core::{
    Account, Feature, Subscription, Wallet, WalletBackend, WalletChange, WalletError, WalletInfo, WalletResult,
};
pub use error::{DappKitError, Result};
pub use registry::{MemoryRegistry, RegistryEvent, WalletRegistry};
pub use selector::{EnvironmentSignals, WalletFilter, WalletPolicy};
pub use storage::{ConnectionStorage, MemoryStorage, PersistedConnection};
pub use store::{ConnectionState, ConnectionStatus, StateSnapshot, StoreConfig, StoreEvent, WalletStore};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use logging::init_logging;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{JsRegistry, JsWalletBackend, LocalStorage, WasmDappKit};
