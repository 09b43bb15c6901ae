//! Connection operations: the state machine driven by the dApp
//!
//! ```text
//! connect ──▶ begin_connect ──▶ wallet.connect ──▶ intents ──▶ chain filter ──▶ select ──▶ finish_connect
//!                                     │ error                                                  │ stale
//!                                     ▼                                                        ▼
//!                               fail_connect + rethrow                              ConnectionSuperseded
//! ```
//!
//! | Operation | Store writes |
//! |-----------|--------------|
//! | `connect` | connecting → connected / disconnected |
//! | `disconnect` | always ends disconnected |
//! | `switch_account` | current account only |
//! | `sign_*` | none |
//! | `auto_connect` | as `connect`, silently, failures swallowed |
//!
//! Preconditions fail fast and are never logged here. Wallet failures pass
//! through unchanged as `DappKitError::Wallet`.

mod args;
mod detection;

pub use args::{
    AutoConnectStatus, ConnectArgs, ConnectResult, SignPersonalMessageArgs, SignTransactionArgs,
};
pub use detection::{DisconnectHook, WalletDetection};

use crate::client::ClientContext;
use crate::config::DappKitConfig;
use crate::core::{
    Account, ConnectInput, ExecutedTransaction, Feature, SignPersonalMessageInput, SignTransactionInput,
    SignedPersonalMessage, SignedTransaction, Subscription, Wallet, WalletChange,
};
use crate::error::{DappKitError, Result};
use crate::registry::WalletRegistry;
use crate::selector::{filter_to_chain_family, select_account, EnvironmentSignals};
use crate::storage::{ConnectionStorage, PersistedConnection};
use crate::store::{StoreConfig, WalletStore};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Entry point: one store, its config and the injected collaborators.
pub struct DappKit {
    store: WalletStore,
    config: DappKitConfig,
    storage: Option<Rc<dyn ConnectionStorage>>,
    client: Option<ClientContext>,
    /// Change listener on the connected wallet. Shared with the detection
    /// hook so a forced disconnect releases it.
    change_subscription: Rc<RefCell<Option<Subscription>>>,
}

impl DappKit {
    pub fn new(config: DappKitConfig) -> Self {
        let store = WalletStore::with_config(StoreConfig {
            auto_connect_enabled: Some(config.auto_connect),
            initial_wallets: None,
        });
        Self { store, config, storage: None, client: None, change_subscription: Rc::default() }
    }

    /// Use an existing store instead of a fresh one.
    pub fn with_store(mut self, store: WalletStore) -> Self { self.store = store; self }
    pub fn with_storage(mut self, storage: Rc<dyn ConnectionStorage>) -> Self { self.storage = Some(storage); self }
    pub fn with_client(mut self, client: ClientContext) -> Self { self.client = Some(client); self }

    pub fn store(&self) -> &WalletStore {
        &self.store
    }

    pub fn config(&self) -> &DappKitConfig {
        &self.config
    }

    pub fn client(&self) -> Result<&ClientContext> {
        self.client.as_ref().ok_or(DappKitError::MissingContext("ClientContext"))
    }

    /// Start watching `registry` with the configured preferences and filter.
    /// Unregistering the connected wallet also drops its listener and the
    /// remembered connection.
    pub fn detect(&self, registry: Rc<dyn WalletRegistry>, signals: Option<&EnvironmentSignals>) -> WalletDetection {
        let subscription = self.change_subscription.clone();
        let storage = self.storage.clone();
        let key = self.config.storage_key.clone();
        let on_disconnect: DisconnectHook = Rc::new(move |removed: &Wallet| {
            subscription.borrow_mut().take();
            if let Some(storage) = &storage {
                forget(storage.as_ref(), &key);
            }
            tracing::info!(wallet = removed.name(), "disconnected: wallet unregistered");
        });
        WalletDetection::mount_with_hook(
            registry,
            self.store.clone(),
            self.config.preferred_wallets.clone(),
            Some(self.config.effective_filter(signals)),
            Some(on_disconnect),
        )
    }

    // =========================================================================
    // CONNECT / DISCONNECT
    // =========================================================================

    pub async fn connect(&self, args: impl Into<ConnectArgs>) -> Result<ConnectResult> {
        let ConnectArgs { wallet, account_address, silent } = args.into();
        let ticket = self.store.begin_connect(&wallet);

        let (accounts, intents) = match self.establish(&wallet, silent).await {
            Ok(connected) => connected,
            Err(e) => {
                self.store.fail_connect(ticket);
                if let DappKitError::Wallet(cause) = &e {
                    tracing::info!(wallet = wallet.name(), error = %cause, "connect failed");
                }
                return Err(e);
            }
        };

        let selected = select_account(&accounts, account_address.as_deref());
        let address = selected.as_ref().map(|a| a.address.clone());
        self.store.finish_connect(ticket, accounts.clone(), selected, intents)?;

        self.remember(wallet.name(), address.clone());
        self.watch(&wallet);
        tracing::info!(wallet = wallet.name(), address = ?address, "connected");
        Ok(ConnectResult { accounts })
    }

    /// Wallet calls of a connect: connect, then intents, then chain filtering.
    async fn establish(&self, wallet: &Wallet, silent: bool) -> Result<(Vec<Account>, BTreeSet<String>)> {
        require(wallet, Feature::Connect)?;
        let output = wallet.backend().connect(ConnectInput { silent }).await?;

        let intents = match output.supported_intents {
            Some(intents) => intents,
            None if wallet.has_feature(&Feature::GetCapabilities) => {
                wallet.backend().get_capabilities().await?.supported_intents.unwrap_or_default()
            }
            None => Vec::new(),
        };

        let accounts = filter_to_chain_family(&output.accounts, &self.config.chain_family);
        Ok((accounts, intents.into_iter().collect()))
    }

    /// Calls the wallet's disconnect if declared, then always clears the
    /// connection. A wallet failure is returned after the store is cleared.
    pub async fn disconnect(&self) -> Result<()> {
        let wallet = self.store.current_wallet();
        self.change_subscription.borrow_mut().take();

        let outcome = match &wallet {
            Some(w) if w.has_feature(&Feature::Disconnect) => w.backend().disconnect().await,
            _ => Ok(()),
        };

        // A connect may have completed while the wallet was answering.
        self.change_subscription.borrow_mut().take();
        self.store.set_wallet_disconnected();
        self.forget();
        match &wallet {
            Some(w) => tracing::info!(wallet = w.name(), "disconnected"),
            None => tracing::debug!("disconnect without wallet"),
        }
        outcome.map_err(DappKitError::from)
    }

    pub fn switch_account(&self, account: &Account) -> Result<()> {
        let known = self.store.accounts().iter().any(|a| a.address == account.address);
        if !known {
            return Err(DappKitError::AccountNotFound(account.address.clone()));
        }
        self.store.set_account_switched(account.clone());
        if let Some(wallet) = self.store.current_wallet() {
            self.remember(wallet.name(), Some(account.address.clone()));
        }
        Ok(())
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    /// Current wallet and account, after checking the wallet declares `feature`.
    fn signer(&self, feature: Feature) -> Result<(Wallet, Account)> {
        let wallet = self.store.current_wallet().ok_or(DappKitError::NoWalletConnected)?;
        let account = self.store.current_account().ok_or(DappKitError::NoAccountSelected)?;
        require(&wallet, feature)?;
        Ok((wallet, account))
    }

    fn chain_for(&self, account: &Account, explicit: Option<String>) -> String {
        explicit.unwrap_or_else(|| account.default_chain(&self.config.chain_family, &self.config.default_network))
    }

    pub async fn sign_transaction(&self, args: SignTransactionArgs) -> Result<SignedTransaction> {
        let (wallet, account) = self.signer(Feature::SignTransaction)?;
        let chain = self.chain_for(&account, args.chain);
        let input = SignTransactionInput { transaction: args.transaction, account, chain };
        Ok(wallet.backend().sign_transaction(input).await?)
    }

    pub async fn sign_and_execute_transaction(&self, args: SignTransactionArgs) -> Result<ExecutedTransaction> {
        let (wallet, account) = self.signer(Feature::SignAndExecuteTransaction)?;
        let chain = self.chain_for(&account, args.chain);
        let input = SignTransactionInput { transaction: args.transaction, account, chain };
        Ok(wallet.backend().sign_and_execute_transaction(input).await?)
    }

    pub async fn sign_personal_message(
        &self,
        args: impl Into<SignPersonalMessageArgs>,
    ) -> Result<SignedPersonalMessage> {
        let (wallet, account) = self.signer(Feature::SignPersonalMessage)?;
        let input = SignPersonalMessageInput { message: args.into().message, account };
        Ok(wallet.backend().sign_personal_message(input).await?)
    }

    // =========================================================================
    // AUTO-CONNECT
    // =========================================================================

    /// Silently reconnect to the remembered wallet if it is registered.
    /// Never fails on the wallet's behalf: a failed attempt clears the record.
    pub async fn auto_connect(&self) -> Result<AutoConnectStatus> {
        if !self.config.auto_connect || !self.store.auto_connect_enabled() {
            return Ok(AutoConnectStatus::Disabled);
        }
        if !self.store.is_disconnected() {
            return Ok(AutoConnectStatus::Idle);
        }
        let Some(storage) = &self.storage else { return Ok(AutoConnectStatus::Idle) };
        let record = match PersistedConnection::load(storage.as_ref(), &self.config.storage_key) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(AutoConnectStatus::Idle),
            Err(e) => {
                tracing::warn!(error = %e, "auto-connect: unreadable record, clearing");
                self.forget();
                return Ok(AutoConnectStatus::Idle);
            }
        };
        let Some(wallet) = self.store.wallets().into_iter().find(|w| w.name() == record.wallet_name) else {
            return Ok(AutoConnectStatus::Idle);
        };

        let mut args = ConnectArgs::new(wallet).silent();
        args.account_address = record.account_address;
        match self.connect(args).await {
            Ok(_) => {}
            Err(DappKitError::ConnectionSuperseded) => {}
            Err(e) => {
                tracing::warn!(wallet = %record.wallet_name, error = %e, "auto-connect failed");
                self.forget();
            }
        }
        Ok(AutoConnectStatus::Attempted)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn remember(&self, wallet_name: &str, address: Option<String>) {
        let Some(storage) = &self.storage else { return };
        let record = PersistedConnection::new(wallet_name, address);
        if let Err(e) = record.save(storage.as_ref(), &self.config.storage_key) {
            tracing::warn!(error = %e, "failed to persist connection");
        }
    }

    fn forget(&self) {
        if let Some(storage) = &self.storage {
            forget(storage.as_ref(), &self.config.storage_key);
        }
    }

    /// Feed the wallet's account changes into the store while it stays current.
    fn watch(&self, wallet: &Wallet) {
        self.change_subscription.borrow_mut().take();
        if !wallet.has_feature(&Feature::Events) {
            return;
        }
        let store = self.store.clone();
        let watched = wallet.clone();
        let family = self.config.chain_family.clone();
        let listener = Rc::new(move |change: WalletChange| {
            let Some(accounts) = change.accounts else { return };
            if store.current_wallet().map_or(false, |current| current.ptr_eq(&watched)) {
                store.update_wallet_accounts(filter_to_chain_family(&accounts, &family));
            }
        });
        match wallet.backend().on_change(listener) {
            Ok(subscription) => *self.change_subscription.borrow_mut() = Some(subscription),
            Err(e) => tracing::warn!(wallet = wallet.name(), error = %e, "change events unavailable"),
        }
    }
}

fn forget(storage: &dyn ConnectionStorage, key: &str) {
    if let Err(e) = storage.remove(key) {
        tracing::warn!(error = %e, "failed to clear persisted connection");
    }
}

fn require(wallet: &Wallet, feature: Feature) -> Result<()> {
    if wallet.has_feature(&feature) {
        Ok(())
    } else {
        Err(DappKitError::FeatureUnsupported { wallet: wallet.name().to_string(), feature })
    }
}
