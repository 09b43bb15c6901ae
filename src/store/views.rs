//! Derived read views over the store
//!
//! Each view borrows the state once and returns an owned value, so callers
//! never hold a borrow across an await point.

use super::{ConnectionState, ConnectionStatus, WalletStore};
use crate::core::{Account, Wallet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Serializable copy of the state. Wallets are reduced to their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub auto_connect_enabled: bool,
    pub wallets: Vec<String>,
    pub accounts: Vec<Account>,
    pub current_wallet: Option<String>,
    pub current_account: Option<Account>,
    pub last_connected_account_address: Option<String>,
    pub last_connected_wallet_name: Option<String>,
    pub connection_status: ConnectionStatus,
    pub supported_intents: Vec<String>,
    pub is_connected: bool,
}

impl From<&ConnectionState> for StateSnapshot {
    fn from(state: &ConnectionState) -> Self {
        Self {
            auto_connect_enabled: state.auto_connect_enabled,
            wallets: state.wallets.iter().map(|w| w.name().to_string()).collect(),
            accounts: state.accounts.clone(),
            current_wallet: state.current_wallet.as_ref().map(|w| w.name().to_string()),
            current_account: state.current_account.clone(),
            last_connected_account_address: state.last_connected_account_address.clone(),
            last_connected_wallet_name: state.last_connected_wallet_name.clone(),
            connection_status: state.connection_status,
            supported_intents: state.supported_intents.iter().cloned().collect(),
            is_connected: state.connection_status == ConnectionStatus::Connected && state.current_wallet.is_some(),
        }
    }
}

impl WalletStore {
    /// Owned copy of the full state.
    pub fn snapshot(&self) -> ConnectionState {
        self.inner.borrow().state.clone()
    }

    pub fn export(&self) -> StateSnapshot {
        StateSnapshot::from(&self.inner.borrow().state)
    }

    fn read<T>(&self, f: impl FnOnce(&ConnectionState) -> T) -> T {
        f(&self.inner.borrow().state)
    }

    pub fn current_wallet(&self) -> Option<Wallet> {
        self.read(|s| s.current_wallet.clone())
    }

    pub fn current_account(&self) -> Option<Account> {
        self.read(|s| s.current_account.clone())
    }

    /// Address of the current account.
    pub fn address(&self) -> Option<String> {
        self.read(|s| s.current_account.as_ref().map(|a| a.address.clone()))
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.read(|s| s.connection_status)
    }

    /// Connected with a wallet present.
    pub fn is_connected(&self) -> bool {
        self.read(|s| s.connection_status == ConnectionStatus::Connected && s.current_wallet.is_some())
    }

    pub fn is_connecting(&self) -> bool {
        self.connection_status() == ConnectionStatus::Connecting
    }

    pub fn is_disconnected(&self) -> bool {
        self.connection_status() == ConnectionStatus::Disconnected
    }

    pub fn wallets(&self) -> Vec<Wallet> {
        self.read(|s| s.wallets.clone())
    }

    pub fn wallet_count(&self) -> usize {
        self.read(|s| s.wallets.len())
    }

    pub fn has_wallets(&self) -> bool {
        self.wallet_count() > 0
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.read(|s| s.accounts.clone())
    }

    pub fn account_count(&self) -> usize {
        self.read(|s| s.accounts.len())
    }

    pub fn has_accounts(&self) -> bool {
        self.account_count() > 0
    }

    pub fn supported_intents(&self) -> BTreeSet<String> {
        self.read(|s| s.supported_intents.clone())
    }

    pub fn auto_connect_enabled(&self) -> bool {
        self.read(|s| s.auto_connect_enabled)
    }

    pub fn last_connected_wallet_name(&self) -> Option<String> {
        self.read(|s| s.last_connected_wallet_name.clone())
    }

    pub fn last_connected_account_address(&self) -> Option<String> {
        self.read(|s| s.last_connected_account_address.clone())
    }
}
