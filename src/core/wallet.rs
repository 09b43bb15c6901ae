//! Wallet: opaque reference to a third-party signing provider
//!
//! A `Wallet` is a cheap clone of a reference-counted record. The record
//! carries the declared feature set and the backend that implements those
//! features. Capability presence is a set-membership test on the declared
//! features; the backend is never probed by calling it.
//!
//! Wallets are compared by identity (`ptr_eq`), never by value. The backend
//! is owned by whoever registered the wallet and is passed through untouched.

use super::account::Account;
use super::features::Feature;
use super::subscription::Subscription;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Failures raised by a wallet's own capability calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("{0}")]
    Rejected(String),

    #[error("wallet does not implement {0}")]
    Unsupported(Feature),

    #[error("wallet error: {0}")]
    Other(String),
}

pub type WalletResult<T> = Result<T, WalletError>;

// =============================================================================
// CAPABILITY PAYLOADS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectInput {
    /// Connect without prompting (used by auto-connect).
    #[serde(default)]
    pub silent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOutput {
    pub accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_intents: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default)]
    pub supported_intents: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTransactionInput {
    /// Serialized transaction, as produced by the transaction builder.
    pub transaction: String,
    pub account: Account,
    pub chain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub bytes: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedTransaction {
    pub digest: String,
    pub bytes: String,
    pub signature: String,
    /// Base64 BCS effects
    #[serde(default)]
    pub effects: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPersonalMessageInput {
    pub message: Vec<u8>,
    pub account: Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPersonalMessage {
    pub bytes: String,
    pub signature: String,
}

/// Properties a wallet reports through its change event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletChange {
    pub accounts: Option<Vec<Account>>,
}

pub type ChangeListener = Rc<dyn Fn(WalletChange)>;

// =============================================================================
// BACKEND
// =============================================================================

/// Implementation side of a wallet. Only methods whose feature is declared in
/// the wallet's `WalletInfo` are ever called.
#[async_trait(?Send)]
pub trait WalletBackend {
    async fn connect(&self, input: ConnectInput) -> WalletResult<ConnectOutput>;

    /// Accounts the wallet currently authorizes (`standard:accounts`).
    fn accounts(&self) -> Vec<Account> {
        Vec::new()
    }

    async fn disconnect(&self) -> WalletResult<()> {
        Err(WalletError::Unsupported(Feature::Disconnect))
    }

    async fn get_capabilities(&self) -> WalletResult<Capabilities> {
        Err(WalletError::Unsupported(Feature::GetCapabilities))
    }

    async fn sign_transaction(&self, _input: SignTransactionInput) -> WalletResult<SignedTransaction> {
        Err(WalletError::Unsupported(Feature::SignTransaction))
    }

    async fn sign_and_execute_transaction(&self, _input: SignTransactionInput) -> WalletResult<ExecutedTransaction> {
        Err(WalletError::Unsupported(Feature::SignAndExecuteTransaction))
    }

    async fn sign_personal_message(&self, _input: SignPersonalMessageInput) -> WalletResult<SignedPersonalMessage> {
        Err(WalletError::Unsupported(Feature::SignPersonalMessage))
    }

    /// Listen for property changes (`standard:events`).
    fn on_change(&self, _listener: ChangeListener) -> WalletResult<Subscription> {
        Err(WalletError::Unsupported(Feature::Events))
    }
}

// =============================================================================
// WALLET
// =============================================================================

/// Descriptive data a wallet announces when it registers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletInfo {
    pub name: String,
    pub version: String,
    pub icon: Option<String>,
    pub chains: Vec<String>,
    pub features: BTreeSet<Feature>,
}

impl WalletInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), version: "1.0.0".into(), ..Default::default() }
    }
    pub fn with_version(mut self, v: impl Into<String>) -> Self { self.version = v.into(); self }
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self { self.icon = Some(icon.into()); self }
    pub fn with_chains<I, S>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chains = chains.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_feature(mut self, feature: Feature) -> Self { self.features.insert(feature); self }
    pub fn with_features<I: IntoIterator<Item = Feature>>(mut self, features: I) -> Self {
        self.features.extend(features);
        self
    }
}

struct WalletInner {
    info: WalletInfo,
    backend: Box<dyn WalletBackend>,
}

/// Reference handle to a registered wallet.
#[derive(Clone)]
pub struct Wallet {
    inner: Rc<WalletInner>,
}

impl Wallet {
    pub fn new(info: WalletInfo, backend: impl WalletBackend + 'static) -> Self {
        Self { inner: Rc::new(WalletInner { info, backend: Box::new(backend) }) }
    }

    /// Unique identifier of the wallet.
    pub fn name(&self) -> &str { &self.inner.info.name }
    pub fn version(&self) -> &str { &self.inner.info.version }
    pub fn icon(&self) -> Option<&str> { self.inner.info.icon.as_deref() }
    pub fn chains(&self) -> &[String] { &self.inner.info.chains }
    pub fn features(&self) -> &BTreeSet<Feature> { &self.inner.info.features }
    pub fn info(&self) -> &WalletInfo { &self.inner.info }

    pub fn has_feature(&self, feature: &Feature) -> bool {
        self.inner.info.features.contains(feature)
    }

    pub fn backend(&self) -> &dyn WalletBackend {
        self.inner.backend.as_ref()
    }

    /// Accounts currently authorized by the wallet.
    pub fn accounts(&self) -> Vec<Account> {
        if self.has_feature(&Feature::Accounts) { self.inner.backend.accounts() } else { Vec::new() }
    }

    /// Identity comparison: true only for clones of the same registered wallet.
    pub fn ptr_eq(&self, other: &Wallet) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Wallet {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Wallet {}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("name", &self.name())
            .field("version", &self.version())
            .field("features", &self.features().iter().map(Feature::as_str).collect::<Vec<_>>())
            .finish()
    }
}
