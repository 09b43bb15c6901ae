//! Integration Tests: connection operations end to end
//!
//! These tests verify:
//! 1. Connect: account filtering, selection, intents, failure recovery
//! 2. Disconnect and account switching
//! 3. Signing preconditions and default chain
//! 4. In-flight connect vs disconnect/unregister races
//! 5. Persisted connection and auto-connect
//! 6. Wallet change events

use async_trait::async_trait;
use dappkit::core::{
    Capabilities, ChangeListener, ConnectInput, ConnectOutput, ExecutedTransaction, SignPersonalMessageInput,
    SignTransactionInput, SignedPersonalMessage, SignedTransaction,
};
use dappkit::{
    Account, AutoConnectStatus, ConnectArgs, ConnectionStatus, ConnectionStorage, DappKit, DappKitConfig,
    DappKitError, Feature, MemoryRegistry, MemoryStorage, PersistedConnection, SignTransactionArgs, Subscription,
    Wallet, WalletBackend, WalletChange, WalletError, WalletInfo, WalletResult,
};
use futures::channel::oneshot;
use futures::future::join;
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::rc::Rc;

const STORAGE_KEY: &str = "sui-dapp-kit:wallet-connection-info";

static FULL_FEATURES: Lazy<Vec<Feature>> = Lazy::new(|| {
    vec![
        Feature::Connect,
        Feature::Disconnect,
        Feature::Accounts,
        Feature::Events,
        Feature::SignTransaction,
        Feature::SignAndExecuteTransaction,
        Feature::SignPersonalMessage,
    ]
});

fn account(address: &str, chain: &str) -> Account {
    Account::new(address, vec![chain.to_string()])
}

// =============================================================================
// SCRIPTED WALLET
// =============================================================================

/// Shared view of what the wallet saw.
#[derive(Clone, Default)]
struct Probe {
    calls: Rc<RefCell<Vec<String>>>,
    listeners: Rc<RefCell<Vec<ChangeListener>>>,
}

impl Probe {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn emit(&self, change: WalletChange) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(change.clone());
        }
    }
}

#[derive(Default)]
struct Scripted {
    accounts: Vec<Account>,
    intents: Option<Vec<String>>,
    capabilities: Option<Vec<String>>,
    connect_error: Option<WalletError>,
    disconnect_error: Option<WalletError>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    disconnect_gate: RefCell<Option<oneshot::Receiver<()>>>,
    probe: Probe,
}

#[async_trait(?Send)]
impl WalletBackend for Scripted {
    async fn connect(&self, input: ConnectInput) -> WalletResult<ConnectOutput> {
        self.probe.calls.borrow_mut().push(format!("connect silent={}", input.silent));
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        Ok(ConnectOutput { accounts: self.accounts.clone(), supported_intents: self.intents.clone() })
    }

    fn accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    async fn disconnect(&self) -> WalletResult<()> {
        self.probe.calls.borrow_mut().push("disconnect".into());
        let gate = self.disconnect_gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        match &self.disconnect_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn get_capabilities(&self) -> WalletResult<Capabilities> {
        self.probe.calls.borrow_mut().push("getCapabilities".into());
        Ok(Capabilities { supported_intents: self.capabilities.clone() })
    }

    async fn sign_transaction(&self, input: SignTransactionInput) -> WalletResult<SignedTransaction> {
        self.probe.calls.borrow_mut().push(format!("sign {} {} {}", input.transaction, input.account.address, input.chain));
        Ok(SignedTransaction { bytes: input.transaction, signature: "sig".into() })
    }

    async fn sign_and_execute_transaction(&self, input: SignTransactionInput) -> WalletResult<ExecutedTransaction> {
        self.probe.calls.borrow_mut().push(format!("execute {}", input.chain));
        Ok(ExecutedTransaction {
            digest: "digest".into(),
            bytes: input.transaction,
            signature: "sig".into(),
            effects: String::new(),
        })
    }

    async fn sign_personal_message(&self, input: SignPersonalMessageInput) -> WalletResult<SignedPersonalMessage> {
        let text = String::from_utf8_lossy(&input.message).to_string();
        self.probe.calls.borrow_mut().push(format!("message {}", text));
        Ok(SignedPersonalMessage { bytes: text, signature: "sig".into() })
    }

    fn on_change(&self, listener: ChangeListener) -> WalletResult<Subscription> {
        self.probe.listeners.borrow_mut().push(listener);
        let listeners = self.probe.listeners.clone();
        Ok(Subscription::new(move || listeners.borrow_mut().clear()))
    }
}

fn scripted_wallet(name: &str, features: &[Feature], backend: Scripted) -> (Wallet, Probe) {
    let probe = backend.probe.clone();
    let info = WalletInfo::new(name).with_chains(["sui:mainnet"]).with_features(features.iter().cloned());
    (Wallet::new(info, backend), probe)
}

fn wallet_with_accounts(name: &str, accounts: Vec<Account>) -> (Wallet, Probe) {
    scripted_wallet(name, &FULL_FEATURES, Scripted { accounts, ..Default::default() })
}

fn kit() -> DappKit {
    DappKit::new(DappKitConfig::new("tests"))
}

// =============================================================================
// CONNECT
// =============================================================================

#[tokio::test]
async fn connect_selects_first_account() {
    let kit = kit();
    let (wallet, probe) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet")]);

    let result = kit.connect(wallet.clone()).await.expect("connect");
    assert_eq!(result.accounts, vec![account("0x1", "sui:mainnet")]);

    let state = kit.store().snapshot();
    assert_eq!(state.connection_status, ConnectionStatus::Connected);
    assert_eq!(state.current_wallet, Some(wallet));
    assert_eq!(state.current_account.as_ref().map(|a| a.address.as_str()), Some("0x1"));
    assert_eq!(state.accounts, vec![account("0x1", "sui:mainnet")]);
    assert_eq!(probe.calls(), vec!["connect silent=false"]);
}

#[tokio::test]
async fn connect_filters_chain_family_and_honors_requested_account() {
    let kit = kit();
    let (wallet, _) = wallet_with_accounts(
        "X",
        vec![account("0xeth", "eth:1"), account("0x1", "sui:mainnet"), account("0x2", "sui:testnet")],
    );

    let result = kit.connect(ConnectArgs::new(wallet).with_account("0x2")).await.expect("connect");
    let addresses: Vec<_> = result.accounts.iter().map(|a| a.address.as_str()).collect();
    assert_eq!(addresses, vec!["0x1", "0x2"]);
    assert_eq!(kit.store().address().as_deref(), Some("0x2"));
    assert_eq!(kit.store().last_connected_account_address().as_deref(), Some("0x2"));
}

#[tokio::test]
async fn connect_with_unknown_account_falls_back_to_first() {
    let kit = kit();
    let (wallet, _) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet")]);
    kit.connect(ConnectArgs::new(wallet).with_account("0x9")).await.expect("connect");
    assert_eq!(kit.store().address().as_deref(), Some("0x1"));
}

#[tokio::test]
async fn connect_rejection_propagates_and_resets_status() {
    let kit = kit();
    let backend = Scripted { connect_error: Some(WalletError::Rejected("denied".into())), ..Default::default() };
    let (wallet, _) = scripted_wallet("X", &FULL_FEATURES, backend);

    let err = kit.connect(wallet).await.unwrap_err();
    assert!(matches!(&err, DappKitError::Wallet(WalletError::Rejected(msg)) if msg == "denied"));
    assert_eq!(err.to_string(), "denied");

    let state = kit.store().snapshot();
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    assert!(state.current_wallet.is_none());
}

#[tokio::test]
async fn connect_without_connect_feature_fails_fast() {
    let kit = kit();
    let (wallet, probe) = scripted_wallet("X", &[Feature::Accounts], Scripted::default());
    let err = kit.connect(wallet).await.unwrap_err();
    assert!(matches!(err, DappKitError::FeatureUnsupported { feature: Feature::Connect, .. }));
    assert!(kit.store().is_disconnected());
    assert!(probe.calls().is_empty());
}

#[tokio::test]
async fn intents_come_from_result_then_capabilities_then_empty() {
    let kit = kit();
    let mut features = FULL_FEATURES.clone();
    features.push(Feature::GetCapabilities);

    let from_result = Scripted {
        intents: Some(vec!["a".into()]),
        capabilities: Some(vec!["b".into()]),
        ..Default::default()
    };
    let (wallet, probe) = scripted_wallet("R", &features, from_result);
    kit.connect(wallet).await.expect("connect");
    assert_eq!(kit.store().supported_intents().into_iter().collect::<Vec<_>>(), vec!["a"]);
    assert!(!probe.calls().contains(&"getCapabilities".to_string()));

    let from_capabilities = Scripted { capabilities: Some(vec!["b".into()]), ..Default::default() };
    let (wallet, probe) = scripted_wallet("C", &features, from_capabilities);
    kit.connect(wallet).await.expect("connect");
    assert_eq!(kit.store().supported_intents().into_iter().collect::<Vec<_>>(), vec!["b"]);
    assert!(probe.calls().contains(&"getCapabilities".to_string()));

    let undeclared = Scripted { capabilities: Some(vec!["b".into()]), ..Default::default() };
    let (wallet, probe) = scripted_wallet("N", &FULL_FEATURES, undeclared);
    kit.connect(wallet).await.expect("connect");
    assert!(kit.store().supported_intents().is_empty());
    assert!(!probe.calls().contains(&"getCapabilities".to_string()));
}

// =============================================================================
// DISCONNECT / SWITCH
// =============================================================================

#[tokio::test]
async fn disconnect_calls_wallet_and_clears_state() {
    let kit = kit();
    let (wallet, probe) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet")]);
    kit.connect(wallet).await.expect("connect");

    kit.disconnect().await.expect("disconnect");
    assert_eq!(probe.calls(), vec!["connect silent=false", "disconnect"]);
    let state = kit.store().snapshot();
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    assert!(state.current_wallet.is_none() && state.accounts.is_empty());

    kit.disconnect().await.expect("second disconnect is a no-op");
    assert_eq!(kit.store().snapshot(), state);
}

#[tokio::test]
async fn disconnect_failure_still_clears_state() {
    let kit = kit();
    let backend = Scripted {
        accounts: vec![account("0x1", "sui:mainnet")],
        disconnect_error: Some(WalletError::Other("wallet crashed".into())),
        ..Default::default()
    };
    let (wallet, _) = scripted_wallet("X", &FULL_FEATURES, backend);
    kit.connect(wallet).await.expect("connect");

    let err = kit.disconnect().await.unwrap_err();
    assert!(matches!(err, DappKitError::Wallet(WalletError::Other(_))));
    assert!(kit.store().is_disconnected());
    assert!(kit.store().current_wallet().is_none());
}

#[tokio::test]
async fn switch_to_unknown_account_leaves_store_unchanged() {
    let kit = kit();
    let (wallet, _) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet")]);
    kit.connect(wallet).await.expect("connect");
    let before = kit.store().snapshot();

    let err = kit.switch_account(&account("0x2", "sui:mainnet")).unwrap_err();
    assert!(matches!(&err, DappKitError::AccountNotFound(address) if address == "0x2"));
    assert!(err.to_string().contains("Account not found in connected accounts"));
    assert_eq!(kit.store().snapshot(), before);
}

#[tokio::test]
async fn switch_account_updates_selection_only() {
    let kit = kit();
    let (wallet, _) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet"), account("0x2", "sui:mainnet")]);
    kit.connect(wallet.clone()).await.expect("connect");

    kit.switch_account(&account("0x2", "sui:mainnet")).expect("switch");
    assert_eq!(kit.store().address().as_deref(), Some("0x2"));
    assert_eq!(kit.store().current_wallet(), Some(wallet));
    assert!(kit.store().is_connected());
}

// =============================================================================
// SIGNING
// =============================================================================

#[tokio::test]
async fn signing_requires_wallet_account_and_feature() {
    let kit = kit();
    let err = kit.sign_transaction(SignTransactionArgs::new("tx")).await.unwrap_err();
    assert!(matches!(err, DappKitError::NoWalletConnected));
    assert_eq!(err.to_string(), "No wallet connected");

    let (empty, _) = wallet_with_accounts("Empty", vec![]);
    kit.connect(empty).await.expect("connect");
    let err = kit.sign_personal_message("hi").await.unwrap_err();
    assert!(matches!(err, DappKitError::NoAccountSelected));

    let features = [Feature::Connect, Feature::Disconnect, Feature::Accounts, Feature::SignTransaction];
    let (limited, probe) =
        scripted_wallet("Limited", &features, Scripted { accounts: vec![account("0x1", "sui:mainnet")], ..Default::default() });
    kit.connect(limited).await.expect("connect");
    let err = kit.sign_and_execute_transaction(SignTransactionArgs::new("tx")).await.unwrap_err();
    assert!(matches!(err, DappKitError::FeatureUnsupported { feature: Feature::SignAndExecuteTransaction, .. }));
    assert!(!probe.calls().iter().any(|c| c.starts_with("execute")));
}

#[tokio::test]
async fn signing_defaults_chain_from_account() {
    let kit = kit();
    let (wallet, probe) = wallet_with_accounts("X", vec![account("0x1", "sui:testnet")]);
    kit.connect(wallet).await.expect("connect");
    let before = kit.store().snapshot();

    let signed = kit.sign_transaction(SignTransactionArgs::new("tx1")).await.expect("sign");
    assert_eq!(signed.bytes, "tx1");
    kit.sign_transaction(SignTransactionArgs::new("tx2").with_chain("sui:devnet")).await.expect("sign");
    let executed = kit.sign_and_execute_transaction(SignTransactionArgs::new("tx3")).await.expect("execute");
    assert_eq!(executed.digest, "digest");
    let message = kit.sign_personal_message("hello").await.expect("message");
    assert_eq!(message.bytes, "hello");

    let calls = probe.calls();
    assert_eq!(
        &calls[1..],
        &["sign tx1 0x1 sui:testnet", "sign tx2 0x1 sui:devnet", "execute sui:testnet", "message hello"]
    );
    assert_eq!(kit.store().snapshot(), before);
}

#[tokio::test]
async fn signing_falls_back_to_default_network() {
    let kit = kit();
    let (wallet, probe) = wallet_with_accounts("X", vec![]);
    // A bare `sui` chain carries no network and would be filtered at connect
    kit.store().set_wallet_connected(
        &wallet,
        vec![Account::new("0x1", vec!["sui".into()])],
        Some(Account::new("0x1", vec!["sui".into()])),
        Default::default(),
    );
    kit.sign_transaction(SignTransactionArgs::new("tx")).await.expect("sign");
    assert_eq!(probe.calls(), vec!["sign tx 0x1 sui:mainnet"]);
}

// =============================================================================
// RACES
// =============================================================================

#[tokio::test]
async fn disconnect_during_connect_wins() {
    let kit = kit();
    let (tx, rx) = oneshot::channel();
    let backend = Scripted {
        accounts: vec![account("0x1", "sui:mainnet")],
        gate: RefCell::new(Some(rx)),
        ..Default::default()
    };
    let (wallet, _) = scripted_wallet("X", &FULL_FEATURES, backend);

    let (connected, _) = join(kit.connect(wallet), async {
        assert!(kit.store().is_connecting());
        kit.disconnect().await.expect("disconnect");
        let _ = tx.send(());
    })
    .await;

    assert!(matches!(connected, Err(DappKitError::ConnectionSuperseded)));
    let state = kit.store().snapshot();
    assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    assert!(state.current_wallet.is_none());
}

#[tokio::test]
async fn unregister_during_connect_wins() {
    let kit = kit();
    let registry = Rc::new(MemoryRegistry::new());
    let _detection = kit.detect(registry.clone(), None);

    let (tx, rx) = oneshot::channel();
    let backend = Scripted {
        accounts: vec![account("0x1", "sui:mainnet")],
        gate: RefCell::new(Some(rx)),
        ..Default::default()
    };
    let (wallet, _) = scripted_wallet("X", &FULL_FEATURES, backend);
    registry.register(wallet.clone());
    assert_eq!(kit.store().wallet_count(), 1);

    let (connected, _) = join(kit.connect(wallet.clone()), async {
        registry.unregister(&wallet);
        let _ = tx.send(());
    })
    .await;

    assert!(matches!(connected, Err(DappKitError::ConnectionSuperseded)));
    assert!(kit.store().is_disconnected());
    assert!(!kit.store().has_wallets());
}

#[tokio::test]
async fn connect_during_disconnect_is_cleared_with_its_listener() {
    let kit = kit();
    let (tx, rx) = oneshot::channel();
    let slow = Scripted {
        accounts: vec![account("0x1", "sui:mainnet")],
        disconnect_gate: RefCell::new(Some(rx)),
        ..Default::default()
    };
    let (first, _) = scripted_wallet("Slow", &FULL_FEATURES, slow);
    let (second, second_probe) = wallet_with_accounts("Next", vec![account("0x2", "sui:mainnet")]);
    kit.connect(first).await.expect("connect");

    let (disconnected, _) = join(kit.disconnect(), async {
        kit.connect(second).await.expect("connect during disconnect");
        assert_eq!(second_probe.listeners.borrow().len(), 1);
        let _ = tx.send(());
    })
    .await;

    disconnected.expect("disconnect");
    assert!(kit.store().is_disconnected());
    assert!(second_probe.listeners.borrow().is_empty());
}

#[tokio::test]
async fn newer_connect_supersedes_older() {
    let kit = kit();
    let (tx, rx) = oneshot::channel();
    let slow = Scripted { accounts: vec![account("0xs", "sui:mainnet")], gate: RefCell::new(Some(rx)), ..Default::default() };
    let (slow, _) = scripted_wallet("Slow", &FULL_FEATURES, slow);
    let (fast, _) = wallet_with_accounts("Fast", vec![account("0xf", "sui:mainnet")]);

    let (first, second) = join(kit.connect(slow), async {
        let result = kit.connect(fast.clone()).await;
        let _ = tx.send(());
        result
    })
    .await;

    assert!(matches!(first, Err(DappKitError::ConnectionSuperseded)));
    assert!(second.is_ok());
    assert_eq!(kit.store().current_wallet(), Some(fast));
    assert_eq!(kit.store().address().as_deref(), Some("0xf"));
}

// =============================================================================
// PERSISTENCE / AUTO-CONNECT
// =============================================================================

fn persistent_kit(storage: &MemoryStorage) -> DappKit {
    DappKit::new(DappKitConfig::new("tests")).with_storage(Rc::new(storage.clone()))
}

#[tokio::test]
async fn connection_is_remembered_and_forgotten() {
    let storage = MemoryStorage::new();
    let kit = persistent_kit(&storage);
    let (wallet, _) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet"), account("0x2", "sui:mainnet")]);

    kit.connect(wallet).await.expect("connect");
    let record = PersistedConnection::load(&storage, STORAGE_KEY).unwrap();
    assert_eq!(record, Some(PersistedConnection::new("X", Some("0x1".into()))));

    kit.switch_account(&account("0x2", "sui:mainnet")).expect("switch");
    let record = PersistedConnection::load(&storage, STORAGE_KEY).unwrap();
    assert_eq!(record.and_then(|r| r.account_address).as_deref(), Some("0x2"));

    kit.disconnect().await.expect("disconnect");
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn unregistered_wallet_is_forgotten_and_not_restored() {
    let storage = MemoryStorage::new();
    let kit = persistent_kit(&storage);
    let registry = Rc::new(MemoryRegistry::new());
    let _detection = kit.detect(registry.clone(), None);
    let (wallet, probe) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet")]);
    registry.register(wallet.clone());

    kit.connect(wallet.clone()).await.expect("connect");
    assert!(storage.get(STORAGE_KEY).unwrap().is_some());
    assert_eq!(probe.listeners.borrow().len(), 1);

    registry.unregister(&wallet);
    assert!(kit.store().is_disconnected());
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
    assert!(probe.listeners.borrow().is_empty());

    registry.register(wallet);
    assert_eq!(kit.auto_connect().await.unwrap(), AutoConnectStatus::Idle);
    assert!(kit.store().is_disconnected());
    assert_eq!(probe.calls(), vec!["connect silent=false"]);
}

#[tokio::test]
async fn auto_connect_restores_remembered_wallet_silently() {
    let storage = MemoryStorage::new();
    PersistedConnection::new("X", Some("0x2".into())).save(&storage, STORAGE_KEY).unwrap();

    let kit = persistent_kit(&storage);
    let registry = Rc::new(MemoryRegistry::new());
    let (wallet, probe) = wallet_with_accounts("X", vec![account("0x1", "sui:mainnet"), account("0x2", "sui:mainnet")]);
    registry.register(wallet.clone());
    let _detection = kit.detect(registry, None);

    assert_eq!(kit.auto_connect().await.unwrap(), AutoConnectStatus::Attempted);
    assert_eq!(probe.calls(), vec!["connect silent=true"]);
    assert_eq!(kit.store().current_wallet(), Some(wallet));
    assert_eq!(kit.store().address().as_deref(), Some("0x2"));

    assert_eq!(kit.auto_connect().await.unwrap(), AutoConnectStatus::Idle);
}

#[tokio::test]
async fn auto_connect_idle_and_disabled() {
    let storage = MemoryStorage::new();
    let kit = persistent_kit(&storage);
    assert_eq!(kit.auto_connect().await.unwrap(), AutoConnectStatus::Idle);

    PersistedConnection::new("Gone", None).save(&storage, STORAGE_KEY).unwrap();
    assert_eq!(kit.auto_connect().await.unwrap(), AutoConnectStatus::Idle);

    let disabled = DappKit::new(DappKitConfig::new("tests").with_auto_connect(false)).with_storage(Rc::new(storage.clone()));
    assert_eq!(disabled.auto_connect().await.unwrap(), AutoConnectStatus::Disabled);
    assert!(!disabled.store().auto_connect_enabled());
}

#[tokio::test]
async fn auto_connect_failure_is_swallowed_and_record_cleared() {
    let storage = MemoryStorage::new();
    PersistedConnection::new("X", None).save(&storage, STORAGE_KEY).unwrap();
    let kit = persistent_kit(&storage);

    let backend = Scripted { connect_error: Some(WalletError::Rejected("locked".into())), ..Default::default() };
    let (wallet, _) = scripted_wallet("X", &FULL_FEATURES, backend);
    kit.store().set_wallet_registered(vec![wallet]);

    assert_eq!(kit.auto_connect().await.unwrap(), AutoConnectStatus::Attempted);
    assert!(kit.store().is_disconnected());
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
}

// =============================================================================
// CHANGE EVENTS / CLIENT
// =============================================================================

#[tokio::test]
async fn wallet_account_changes_flow_into_store() {
    let kit = kit();
    let (wallet, probe) = wallet_with_accounts("X", vec![account("0xA", "sui:mainnet"), account("0xB", "sui:mainnet")]);
    kit.connect(wallet).await.expect("connect");
    assert_eq!(probe.listeners.borrow().len(), 1);

    probe.emit(WalletChange {
        accounts: Some(vec![account("0xeth", "eth:1"), account("0xC", "sui:mainnet"), account("0xA", "sui:mainnet")]),
    });
    let addresses: Vec<_> = kit.store().accounts().into_iter().map(|a| a.address).collect();
    assert_eq!(addresses, vec!["0xC", "0xA"]);
    assert_eq!(kit.store().address().as_deref(), Some("0xA"));

    probe.emit(WalletChange { accounts: None });
    assert_eq!(kit.store().account_count(), 2);

    kit.disconnect().await.expect("disconnect");
    assert!(probe.listeners.borrow().is_empty());
}

#[tokio::test]
async fn client_is_required_context() {
    let err = kit().client().err().expect("missing client");
    assert!(matches!(err, DappKitError::MissingContext("ClientContext")));
}
