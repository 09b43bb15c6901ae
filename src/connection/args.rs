//! Typed arguments and results of the kit operations

use crate::core::{Account, Wallet};

/// Arguments to `DappKit::connect`.
#[derive(Debug, Clone)]
pub struct ConnectArgs {
    pub wallet: Wallet,
    /// Account to select if the wallet returns it; otherwise the first account.
    pub account_address: Option<String>,
    /// Forwarded to the wallet's connect call.
    pub silent: bool,
}

impl ConnectArgs {
    pub fn new(wallet: Wallet) -> Self {
        Self { wallet, account_address: None, silent: false }
    }
    pub fn with_account(mut self, address: impl Into<String>) -> Self { self.account_address = Some(address.into()); self }
    pub fn silent(mut self) -> Self { self.silent = true; self }
}

impl From<Wallet> for ConnectArgs {
    fn from(wallet: Wallet) -> Self {
        Self::new(wallet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectResult {
    /// Accounts on the configured chain family, in wallet order.
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTransactionArgs {
    pub transaction: String,
    /// Defaults to `{family}:{network of the account's first chain}`.
    pub chain: Option<String>,
}

impl SignTransactionArgs {
    pub fn new(transaction: impl Into<String>) -> Self {
        Self { transaction: transaction.into(), chain: None }
    }
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self { self.chain = Some(chain.into()); self }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPersonalMessageArgs {
    pub message: Vec<u8>,
}

impl From<Vec<u8>> for SignPersonalMessageArgs {
    fn from(message: Vec<u8>) -> Self {
        Self { message }
    }
}

impl From<&[u8]> for SignPersonalMessageArgs {
    fn from(message: &[u8]) -> Self {
        Self { message: message.to_vec() }
    }
}

/// Text messages are signed as their UTF-8 bytes.
impl From<&str> for SignPersonalMessageArgs {
    fn from(message: &str) -> Self {
        Self { message: message.as_bytes().to_vec() }
    }
}

impl From<String> for SignPersonalMessageArgs {
    fn from(message: String) -> Self {
        Self { message: message.into_bytes() }
    }
}

/// Outcome of `DappKit::auto_connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoConnectStatus {
    /// Auto-connect switched off in config or store.
    Disabled,
    /// Nothing to do: already connected/connecting, no record, or wallet absent.
    Idle,
    /// A silent connect was tried; check the store for the outcome.
    Attempted,
}

impl AutoConnectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoConnectStatus::Disabled => "disabled",
            AutoConnectStatus::Idle => "idle",
            AutoConnectStatus::Attempted => "attempted",
        }
    }
}
