//! Connection state store: single source of truth for wallet/account state
//!
//! ```text
//!                    begin_connect
//!   ┌──────────────┐ ───────────▶ ┌────────────┐  finish_connect  ┌───────────┐
//!   │ disconnected │              │ connecting │ ───────────────▶ │ connected │
//!   └──────────────┘ ◀─────────── └────────────┘                  └───────────┘
//!          ▲          fail_connect / unregister pending                 │
//!          └──────────────── set_wallet_disconnected / unregister ──────┘
//! ```
//!
//! Every mutation is a single synchronous method: callers never patch fields
//! piecemeal. Writers that complete after an `.await` hold a `ConnectTicket`;
//! any disconnect, unregister, reset or newer connect invalidates older tickets
//! so a late completion cannot resurrect a connection.
//!
//! Changes are broadcast to `subscribe()` receivers (unbounded mpsc), the same
//! way namespaces notify their watchers.

mod views;

pub use views::StateSnapshot;

use crate::core::{Account, Wallet};
use crate::error::{DappKitError, Result};
use futures::channel::mpsc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionState {
    pub auto_connect_enabled: bool,
    pub wallets: Vec<Wallet>,
    pub accounts: Vec<Account>,
    pub current_wallet: Option<Wallet>,
    pub current_account: Option<Account>,
    pub last_connected_account_address: Option<String>,
    pub last_connected_wallet_name: Option<String>,
    pub connection_status: ConnectionStatus,
    pub supported_intents: BTreeSet<String>,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            auto_connect_enabled: true,
            wallets: Vec::new(),
            accounts: Vec::new(),
            current_wallet: None,
            current_account: None,
            last_connected_account_address: None,
            last_connected_wallet_name: None,
            connection_status: ConnectionStatus::Disconnected,
            supported_intents: BTreeSet::new(),
        }
    }
}

/// Optional seed values for `WalletStore::initialize`.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub auto_connect_enabled: Option<bool>,
    pub initial_wallets: Option<Vec<Wallet>>,
}

/// Notification sent to subscribers after each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    StatusChanged(ConnectionStatus),
    Connected { wallet: String, address: Option<String> },
    Disconnected,
    AccountSwitched(String),
    AccountsUpdated { count: usize, current: Option<String> },
    WalletsChanged(usize),
    Reset,
}

/// Proof of an in-flight connect. Consumed by `finish_connect` / `fail_connect`.
#[derive(Debug)]
pub struct ConnectTicket {
    epoch: u64,
    wallet: Wallet,
}

impl ConnectTicket {
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }
}

#[derive(Default)]
struct StoreInner {
    state: ConnectionState,
    /// Bumped by every transition that invalidates in-flight connects.
    epoch: u64,
    pending: Option<Wallet>,
}

impl StoreInner {
    fn invalidate_pending(&mut self) {
        self.epoch += 1;
        self.pending = None;
    }

    fn clear_connection(&mut self) {
        self.invalidate_pending();
        let s = &mut self.state;
        s.accounts.clear();
        s.current_wallet = None;
        s.current_account = None;
        s.last_connected_wallet_name = None;
        s.last_connected_account_address = None;
        s.connection_status = ConnectionStatus::Disconnected;
        s.supported_intents.clear();
    }
}

/// Shared handle to the store. Clones point at the same state.
#[derive(Clone, Default)]
pub struct WalletStore {
    inner: Rc<RefCell<StoreInner>>,
    watchers: Rc<RefCell<Vec<mpsc::UnboundedSender<StoreEvent>>>>,
}

impl WalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let store = Self::new();
        store.initialize(config);
        store
    }

    /// Receive a `StoreEvent` after every transition.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.watchers.borrow_mut().push(tx);
        rx
    }

    fn notify(&self, event: StoreEvent) {
        self.watchers.borrow_mut().retain(|tx| tx.unbounded_send(event.clone()).is_ok());
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    pub fn initialize(&self, config: StoreConfig) {
        let mut inner = self.inner.borrow_mut();
        if let Some(enabled) = config.auto_connect_enabled {
            inner.state.auto_connect_enabled = enabled;
        }
        if let Some(wallets) = config.initial_wallets {
            inner.state.wallets = wallets;
        }
    }

    /// Raw status write. `Connected` is only reachable through
    /// `set_wallet_connected`, so it is rejected here unless a wallet is current.
    pub fn set_connection_status(&self, status: ConnectionStatus) -> Result<()> {
        {
            let mut inner = self.inner.borrow_mut();
            let from = inner.state.connection_status;
            if status == ConnectionStatus::Connected && inner.state.current_wallet.is_none() {
                return Err(DappKitError::InvalidTransition { from, to: status });
            }
            if status == ConnectionStatus::Disconnected {
                inner.invalidate_pending();
            }
            inner.state.connection_status = status;
            tracing::debug!(%from, to = %status, "store: status");
        }
        self.notify(StoreEvent::StatusChanged(status));
        Ok(())
    }

    /// Enter `connecting` for `wallet`, superseding any older attempt.
    pub fn begin_connect(&self, wallet: &Wallet) -> ConnectTicket {
        let epoch = {
            let mut inner = self.inner.borrow_mut();
            inner.epoch += 1;
            inner.pending = Some(wallet.clone());
            inner.state.connection_status = ConnectionStatus::Connecting;
            inner.epoch
        };
        tracing::debug!(wallet = wallet.name(), epoch, "store: connecting");
        self.notify(StoreEvent::StatusChanged(ConnectionStatus::Connecting));
        ConnectTicket { epoch, wallet: wallet.clone() }
    }

    /// True while nothing has superseded the ticket.
    pub fn is_current(&self, ticket: &ConnectTicket) -> bool {
        let inner = self.inner.borrow();
        inner.epoch == ticket.epoch && inner.pending.as_ref().map_or(false, |w| w.ptr_eq(&ticket.wallet))
    }

    /// Complete a connect. Fails with `ConnectionSuperseded` (store untouched)
    /// if a disconnect, unregister, reset or newer connect intervened.
    pub fn finish_connect(
        &self,
        ticket: ConnectTicket,
        accounts: Vec<Account>,
        selected: Option<Account>,
        intents: BTreeSet<String>,
    ) -> Result<()> {
        if !self.is_current(&ticket) {
            tracing::debug!(wallet = ticket.wallet.name(), epoch = ticket.epoch, "store: stale connect discarded");
            return Err(DappKitError::ConnectionSuperseded);
        }
        self.set_wallet_connected(&ticket.wallet, accounts, selected, intents);
        Ok(())
    }

    /// Abort a connect. Returns false (store untouched) for a stale ticket.
    pub fn fail_connect(&self, ticket: ConnectTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.invalidate_pending();
            inner.state.connection_status = ConnectionStatus::Disconnected;
        }
        tracing::debug!(wallet = ticket.wallet.name(), "store: connect failed");
        self.notify(StoreEvent::StatusChanged(ConnectionStatus::Disconnected));
        true
    }

    /// The only path to `connected`.
    pub fn set_wallet_connected(
        &self,
        wallet: &Wallet,
        accounts: Vec<Account>,
        selected: Option<Account>,
        intents: BTreeSet<String>,
    ) {
        let address = selected.as_ref().map(|a| a.address.clone());
        {
            let mut inner = self.inner.borrow_mut();
            inner.invalidate_pending();
            let s = &mut inner.state;
            s.accounts = accounts;
            s.current_wallet = Some(wallet.clone());
            s.current_account = selected;
            s.last_connected_wallet_name = Some(wallet.name().to_string());
            s.last_connected_account_address = address.clone();
            s.connection_status = ConnectionStatus::Connected;
            s.supported_intents = intents;
        }
        tracing::debug!(wallet = wallet.name(), address = ?address, "store: connected");
        self.notify(StoreEvent::Connected { wallet: wallet.name().to_string(), address });
    }

    /// Clear the connection. Idempotent.
    pub fn set_wallet_disconnected(&self) {
        self.inner.borrow_mut().clear_connection();
        tracing::debug!("store: disconnected");
        self.notify(StoreEvent::Disconnected);
    }

    /// Caller must have checked that `account` is in `accounts`.
    pub fn set_account_switched(&self, account: Account) {
        let address = account.address.clone();
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.last_connected_account_address = Some(address.clone());
            inner.state.current_account = Some(account);
        }
        tracing::debug!(%address, "store: account switched");
        self.notify(StoreEvent::AccountSwitched(address));
    }

    pub fn set_wallet_registered(&self, wallets: Vec<Wallet>) {
        let count = wallets.len();
        self.inner.borrow_mut().state.wallets = wallets;
        tracing::debug!(count, "store: wallets registered");
        self.notify(StoreEvent::WalletsChanged(count));
    }

    /// Replace the wallet list after `removed` left the registry. Disconnects
    /// first if `removed` is the current wallet, and cancels a pending connect
    /// to it. Returns true when the current connection was dropped.
    pub fn set_wallet_unregistered(&self, wallets: Vec<Wallet>, removed: &Wallet) -> bool {
        let (is_current, is_pending) = {
            let inner = self.inner.borrow();
            (
                inner.state.current_wallet.as_ref().map_or(false, |w| w.ptr_eq(removed)),
                inner.pending.as_ref().map_or(false, |w| w.ptr_eq(removed)),
            )
        };
        if is_current {
            self.set_wallet_disconnected();
        } else if is_pending {
            let _ = self.set_connection_status(ConnectionStatus::Disconnected);
        }
        let count = wallets.len();
        self.inner.borrow_mut().state.wallets = wallets;
        tracing::debug!(wallet = removed.name(), count, "store: wallet unregistered");
        self.notify(StoreEvent::WalletsChanged(count));
        is_current
    }

    /// Replace `accounts`, keeping the selected account when its address survives,
    /// else the first new account, else none.
    pub fn update_wallet_accounts(&self, accounts: Vec<Account>) {
        let (count, current) = {
            let mut inner = self.inner.borrow_mut();
            let s = &mut inner.state;
            let next = s
                .current_account
                .as_ref()
                .and_then(|current| accounts.iter().find(|a| a.address == current.address))
                .or_else(|| accounts.first())
                .cloned();
            s.accounts = accounts;
            s.current_account = next;
            (s.accounts.len(), s.current_account.as_ref().map(|a| a.address.clone()))
        };
        tracing::debug!(count, current = ?current, "store: accounts updated");
        self.notify(StoreEvent::AccountsUpdated { count, current });
    }

    /// Back to the initial state. The handle and its subscribers survive.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.invalidate_pending();
            inner.state = ConnectionState::default();
        }
        tracing::debug!("store: reset");
        self.notify(StoreEvent::Reset);
    }
}
