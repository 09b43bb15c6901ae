//! Integration Tests: wallet discovery
//!
//! These tests verify:
//! 1. Detection snapshots, filters and orders the registry
//! 2. Register/unregister events keep the store in sync
//! 3. Environment signals pick the desktop or mobile policy
//! 4. Teardown releases the registry subscriptions

use async_trait::async_trait;
use dappkit::core::{ConnectInput, ConnectOutput};
use dappkit::{
    Account, DappKit, DappKitConfig, EnvironmentSignals, Feature, MemoryRegistry, Wallet, WalletBackend,
    WalletDetection, WalletInfo, WalletResult, WalletStore,
};
use std::rc::Rc;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

struct Idle;

#[async_trait(?Send)]
impl WalletBackend for Idle {
    async fn connect(&self, _input: ConnectInput) -> WalletResult<ConnectOutput> {
        Ok(ConnectOutput { accounts: vec![Account::new("0x1", vec!["sui:mainnet".into()])], supported_intents: None })
    }
}

fn wallet(name: &str, features: &[Feature]) -> Wallet {
    Wallet::new(WalletInfo::new(name).with_features(features.iter().cloned()), Idle)
}

fn signing_wallet(name: &str) -> Wallet {
    wallet(name, &[Feature::Connect, Feature::Disconnect, Feature::Accounts, Feature::SignTransaction])
}

fn popup_wallet(name: &str) -> Wallet {
    wallet(name, &[Feature::Connect, Feature::Disconnect, Feature::Accounts])
}

fn names(store: &WalletStore) -> Vec<String> {
    store.wallets().iter().map(|w| w.name().to_string()).collect()
}

#[test]
fn detection_orders_preferred_wallets_first() {
    let registry = Rc::new(MemoryRegistry::new());
    for name in ["Alpha", "Slush", "Beta", "Sui Wallet"] {
        registry.register(signing_wallet(name));
    }
    let kit = DappKit::new(DappKitConfig::new("tests"));
    let _detection = kit.detect(registry.clone(), None);

    assert_eq!(names(kit.store()), vec!["Sui Wallet", "Slush", "Alpha", "Beta"]);
}

#[test]
fn wallets_missing_required_features_are_never_surfaced() {
    let registry = Rc::new(MemoryRegistry::new());
    registry.register(wallet("NoAccounts", &[Feature::Connect, Feature::Disconnect, Feature::SignTransaction]));
    registry.register(signing_wallet("Good"));

    let kit = DappKit::new(DappKitConfig::new("tests").with_mobile(true));
    let _detection = kit.detect(registry.clone(), None);
    assert_eq!(names(kit.store()), vec!["Good"]);
}

#[test]
fn events_recompute_the_snapshot() {
    let registry = Rc::new(MemoryRegistry::new());
    let kit = DappKit::new(DappKitConfig::new("tests").with_preferred_wallets(["Late"]));
    let _detection = kit.detect(registry.clone(), None);
    assert!(!kit.store().has_wallets());

    registry.register(signing_wallet("Early"));
    let late = signing_wallet("Late");
    registry.register(late.clone());
    assert_eq!(names(kit.store()), vec!["Late", "Early"]);

    registry.unregister(&late);
    assert_eq!(names(kit.store()), vec!["Early"]);
}

#[test]
fn mobile_environment_admits_popup_wallets() {
    let registry = Rc::new(MemoryRegistry::new());
    registry.register(popup_wallet("Popup"));
    registry.register(signing_wallet("Extension"));

    let desktop = DappKit::new(DappKitConfig::new("tests"));
    let _d = desktop.detect(registry.clone(), Some(&EnvironmentSignals::new(DESKTOP)));
    assert_eq!(names(desktop.store()), vec!["Extension"]);

    let mobile = DappKit::new(DappKitConfig::new("tests"));
    let _m = mobile.detect(registry.clone(), Some(&EnvironmentSignals::new(IPHONE)));
    assert_eq!(names(mobile.store()), vec!["Popup", "Extension"]);

    let forced = DappKit::new(DappKitConfig::new("tests").with_mobile(false));
    let _f = forced.detect(registry.clone(), Some(&EnvironmentSignals::new(IPHONE)));
    assert_eq!(names(forced.store()), vec!["Extension"]);
}

#[test]
fn custom_filter_replaces_policy() {
    let registry = Rc::new(MemoryRegistry::new());
    registry.register(popup_wallet("Popup"));
    registry.register(signing_wallet("Extension"));

    let config = DappKitConfig::new("tests").with_wallet_filter(Rc::new(|w: &Wallet| w.name().starts_with('P')));
    let kit = DappKit::new(config);
    let _detection = kit.detect(registry.clone(), None);
    assert_eq!(names(kit.store()), vec!["Popup"]);
}

#[test]
fn teardown_releases_subscriptions() {
    let registry = Rc::new(MemoryRegistry::new());
    let store = WalletStore::new();
    let detection = WalletDetection::mount(registry.clone(), store.clone(), vec![], None);
    assert_eq!(registry.handler_count(), 2);

    drop(detection);
    assert_eq!(registry.handler_count(), 0);
    registry.register(signing_wallet("After"));
    assert!(!store.has_wallets());
}

#[tokio::test]
async fn unregistering_connected_wallet_disconnects() {
    let registry = Rc::new(MemoryRegistry::new());
    let x = signing_wallet("X");
    registry.register(x.clone());
    registry.register(signing_wallet("Y"));

    let kit = DappKit::new(DappKitConfig::new("tests"));
    let _detection = kit.detect(registry.clone(), None);
    kit.connect(x.clone()).await.expect("connect");
    assert!(kit.store().is_connected());

    registry.unregister(&x);
    let state = kit.store().snapshot();
    assert!(kit.store().is_disconnected());
    assert!(state.current_wallet.is_none());
    assert_eq!(names(kit.store()), vec!["Y"]);
}
