//! WasmDappKit: the kit exposed to JavaScript via wasm-bindgen
//!
//! - WasmDappKit: JS-facing API (mount, connect, disconnect, switch, sign)
//! - DappKit: connection operations over the shared store
//! - JsRegistry / JsWalletBackend: wallet-standard bridge

use super::environment::browser_signals;
use super::registry::JsRegistry;
use super::storage::LocalStorage;
use super::{log, to_js};
use crate::config::DappKitConfig;
use crate::connection::{ConnectArgs, DappKit, SignPersonalMessageArgs, SignTransactionArgs, WalletDetection};
use crate::core::Wallet;
use crate::error::DappKitError;
use crate::selector::environment;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn js_err(e: DappKitError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Options accepted by the JS constructor. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsConfig {
    app: Option<String>,
    preferred_wallets: Option<Vec<String>>,
    mobile: Option<bool>,
    auto_connect: Option<bool>,
    storage_key: Option<String>,
    chain_family: Option<String>,
    default_network: Option<String>,
}

impl From<JsConfig> for DappKitConfig {
    fn from(js: JsConfig) -> Self {
        let mut config = DappKitConfig::new(js.app.unwrap_or_default());
        if let Some(names) = js.preferred_wallets { config = config.with_preferred_wallets(names); }
        if let Some(mobile) = js.mobile { config = config.with_mobile(mobile); }
        if let Some(enabled) = js.auto_connect { config = config.with_auto_connect(enabled); }
        if let Some(key) = js.storage_key { config = config.with_storage_key(key); }
        if let Some(family) = js.chain_family { config = config.with_chain_family(family); }
        if let Some(network) = js.default_network { config = config.with_default_network(network); }
        config
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsWalletSummary<'a> {
    name: &'a str,
    version: &'a str,
    icon: Option<&'a str>,
    chains: &'a [String],
    features: Vec<&'a str>,
}

impl<'a> From<&'a Wallet> for JsWalletSummary<'a> {
    fn from(wallet: &'a Wallet) -> Self {
        Self {
            name: wallet.name(),
            version: wallet.version(),
            icon: wallet.icon(),
            chains: wallet.chains(),
            features: wallet.features().iter().map(|f| f.as_str()).collect(),
        }
    }
}

#[wasm_bindgen]
pub struct WasmDappKit {
    kit: Rc<DappKit>,
    detection: RefCell<Option<WalletDetection>>,
}

#[wasm_bindgen]
impl WasmDappKit {
    /// Create a kit. Persists the last connection in `localStorage` when available.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WasmDappKit, JsValue> {
        let js: JsConfig = if options.is_undefined() || options.is_null() {
            JsConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let mut kit = DappKit::new(js.into());
        match LocalStorage::new() {
            Ok(storage) => kit = kit.with_storage(Rc::new(storage)),
            Err(e) => log!("[dappkit] no persistent storage: {}", e),
        }
        Ok(Self { kit: Rc::new(kit), detection: RefCell::new(None) })
    }

    /// Start watching the wallet-standard registry (`getWallets()` result).
    #[wasm_bindgen]
    pub fn mount(&self, wallets_api: JsValue) {
        let registry = Rc::new(JsRegistry::new(wallets_api));
        let detection = self.kit.detect(registry, browser_signals().as_ref());
        *self.detection.borrow_mut() = Some(detection);
        log!("[dappkit] mounted, {} wallet(s)", self.kit.store().wallet_count());
    }

    #[wasm_bindgen]
    pub fn unmount(&self) {
        self.detection.borrow_mut().take();
    }

    #[wasm_bindgen]
    pub fn wallets(&self) -> Result<JsValue, JsValue> {
        let wallets = self.kit.store().wallets();
        let summaries: Vec<JsWalletSummary> = wallets.iter().map(JsWalletSummary::from).collect();
        to_js(&summaries)
    }

    /// Full state snapshot as a plain object.
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.kit.store().export())
    }

    #[wasm_bindgen]
    pub async fn connect(&self, wallet_name: String, account_address: Option<String>) -> Result<JsValue, JsValue> {
        let wallet = self
            .kit
            .store()
            .wallets()
            .into_iter()
            .find(|w| w.name() == wallet_name)
            .ok_or_else(|| js_err(DappKitError::WalletNotFound(wallet_name.clone())))?;
        let mut args = ConnectArgs::new(wallet);
        args.account_address = account_address;
        let result = self.kit.connect(args).await.map_err(js_err)?;
        to_js(&result.accounts)
    }

    #[wasm_bindgen]
    pub async fn disconnect(&self) -> Result<(), JsValue> {
        self.kit.disconnect().await.map_err(js_err)
    }

    #[wasm_bindgen(js_name = "switchAccount")]
    pub fn switch_account(&self, address: String) -> Result<(), JsValue> {
        let account = self
            .kit
            .store()
            .accounts()
            .into_iter()
            .find(|a| a.address == address)
            .ok_or_else(|| js_err(DappKitError::AccountNotFound(address)))?;
        self.kit.switch_account(&account).map_err(js_err)
    }

    #[wasm_bindgen(js_name = "signTransaction")]
    pub async fn sign_transaction(&self, transaction: String, chain: Option<String>) -> Result<JsValue, JsValue> {
        let args = SignTransactionArgs { transaction, chain };
        to_js(&self.kit.sign_transaction(args).await.map_err(js_err)?)
    }

    #[wasm_bindgen(js_name = "signAndExecuteTransaction")]
    pub async fn sign_and_execute_transaction(&self, transaction: String, chain: Option<String>) -> Result<JsValue, JsValue> {
        let args = SignTransactionArgs { transaction, chain };
        to_js(&self.kit.sign_and_execute_transaction(args).await.map_err(js_err)?)
    }

    /// `message` may be a string (signed as UTF-8) or a `Uint8Array`.
    #[wasm_bindgen(js_name = "signPersonalMessage")]
    pub async fn sign_personal_message(&self, message: JsValue) -> Result<JsValue, JsValue> {
        let args = match message.as_string() {
            Some(text) => SignPersonalMessageArgs::from(text),
            None => SignPersonalMessageArgs::from(js_sys::Uint8Array::new(&message).to_vec()),
        };
        to_js(&self.kit.sign_personal_message(args).await.map_err(js_err)?)
    }

    /// Returns `"disabled"`, `"idle"` or `"attempted"`.
    #[wasm_bindgen(js_name = "autoConnect")]
    pub async fn auto_connect(&self) -> Result<String, JsValue> {
        let status = self.kit.auto_connect().await.map_err(js_err)?;
        Ok(status.as_str().to_string())
    }

    /// Call `callback(state)` after every store transition.
    #[wasm_bindgen]
    pub fn watch(&self, callback: js_sys::Function) {
        let mut rx = self.kit.store().subscribe();
        let store = self.kit.store().clone();
        wasm_bindgen_futures::spawn_local(async move {
            use futures::StreamExt;
            let this = JsValue::NULL;
            while rx.next().await.is_some() {
                if let Ok(state) = to_js(&store.export()) {
                    let _ = callback.call1(&this, &state);
                }
            }
        });
    }

    #[wasm_bindgen(js_name = "isMobile")]
    pub fn is_mobile() -> bool {
        environment::is_mobile(browser_signals().as_ref())
    }
}
