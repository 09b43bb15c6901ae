//! Wallet-standard JS object as a `WalletBackend`
//!
//! The JS object is kept as-is. Each capability is looked up in its
//! `features` map and called with the feature object as `this`. Accounts are
//! handed back to the wallet as the wallet's own JS account objects, since
//! wallets may compare them by reference.

use super::to_js;
use crate::core::features::names;
use crate::core::{
    Account, Capabilities, ChangeListener, ConnectInput, ConnectOutput, ExecutedTransaction, Feature,
    SignPersonalMessageInput, SignTransactionInput, SignedPersonalMessage, SignedTransaction, Subscription, Wallet,
    WalletBackend, WalletChange, WalletError, WalletInfo, WalletResult,
};
use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn js_error(e: JsValue) -> WalletError {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return WalletError::Rejected(err.message().into());
    }
    WalletError::Rejected(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> WalletResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| WalletError::Other(e.to_string()))
}

fn accounts_from_js(value: &JsValue) -> Vec<(JsValue, Account)> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value)
        .iter()
        .filter_map(|raw| from_js::<Account>(raw.clone()).ok().map(|account| (raw, account)))
        .collect()
}

pub struct JsWalletBackend {
    raw: JsValue,
    /// Raw accounts returned by the last connect.
    connected: RefCell<Vec<JsValue>>,
}

impl JsWalletBackend {
    pub fn new(raw: JsValue) -> Self {
        Self { raw, connected: RefCell::new(Vec::new()) }
    }

    pub fn raw(&self) -> &JsValue {
        &self.raw
    }

    fn method(&self, feature: &str, method: &str) -> WalletResult<(JsValue, Function)> {
        let object = get(&get(&self.raw, "features"), feature);
        if object.is_undefined() || object.is_null() {
            return Err(WalletError::Unsupported(Feature::parse(feature)));
        }
        let function = get(&object, method)
            .dyn_into::<Function>()
            .map_err(|_| WalletError::Unsupported(Feature::parse(feature)))?;
        Ok((object, function))
    }

    async fn call(&self, feature: &str, method: &str, arg: Option<JsValue>) -> WalletResult<JsValue> {
        let (this, function) = self.method(feature, method)?;
        let returned = match arg {
            Some(arg) => function.call1(&this, &arg),
            None => function.call0(&this),
        }
        .map_err(js_error)?;
        JsFuture::from(Promise::resolve(&returned)).await.map_err(js_error)
    }

    /// The wallet's own JS object for `account`, falling back to a plain copy.
    fn raw_account(&self, account: &Account) -> WalletResult<JsValue> {
        let connected = self.connected.borrow().clone();
        let live: Vec<JsValue> = Array::from(&get(&self.raw, "accounts")).iter().collect();
        let found = connected.into_iter().chain(live).find(|raw| {
            get(raw, "address").as_string().as_deref() == Some(account.address.as_str())
        });
        match found {
            Some(raw) => Ok(raw),
            None => to_js(account).map_err(|e| WalletError::Other(format!("{:?}", e))),
        }
    }

    fn transaction_input(&self, input: &SignTransactionInput) -> WalletResult<JsValue> {
        // Wallets call `transaction.toJSON()` to obtain the serialized form
        let serialized = JsValue::from_str(&input.transaction);
        let to_json = Closure::wrap(Box::new(move || Promise::resolve(&serialized)) as Box<dyn FnMut() -> Promise>);
        let transaction = Object::new();
        Reflect::set(&transaction, &JsValue::from_str("toJSON"), &to_json.into_js_value()).map_err(js_error)?;

        let arg = Object::new();
        Reflect::set(&arg, &JsValue::from_str("transaction"), &transaction).map_err(js_error)?;
        Reflect::set(&arg, &JsValue::from_str("account"), &self.raw_account(&input.account)?).map_err(js_error)?;
        Reflect::set(&arg, &JsValue::from_str("chain"), &JsValue::from_str(&input.chain)).map_err(js_error)?;
        Ok(arg.into())
    }
}

#[async_trait(?Send)]
impl WalletBackend for JsWalletBackend {
    async fn connect(&self, input: ConnectInput) -> WalletResult<ConnectOutput> {
        let arg = to_js(&input).map_err(js_error)?;
        let output = self.call(names::CONNECT, "connect", Some(arg)).await?;
        let accounts = accounts_from_js(&get(&output, "accounts"));
        *self.connected.borrow_mut() = accounts.iter().map(|(raw, _)| raw.clone()).collect();

        let intents = get(&output, "supportedIntents");
        let supported_intents = if intents.is_undefined() || intents.is_null() { None } else { from_js(intents)? };
        Ok(ConnectOutput { accounts: accounts.into_iter().map(|(_, a)| a).collect(), supported_intents })
    }

    fn accounts(&self) -> Vec<Account> {
        accounts_from_js(&get(&self.raw, "accounts")).into_iter().map(|(_, a)| a).collect()
    }

    async fn disconnect(&self) -> WalletResult<()> {
        self.call(names::DISCONNECT, "disconnect", None).await?;
        self.connected.borrow_mut().clear();
        Ok(())
    }

    async fn get_capabilities(&self) -> WalletResult<Capabilities> {
        from_js(self.call(names::GET_CAPABILITIES, "getCapabilities", None).await?)
    }

    async fn sign_transaction(&self, input: SignTransactionInput) -> WalletResult<SignedTransaction> {
        let arg = self.transaction_input(&input)?;
        from_js(self.call(names::SIGN_TRANSACTION, "signTransaction", Some(arg)).await?)
    }

    async fn sign_and_execute_transaction(&self, input: SignTransactionInput) -> WalletResult<ExecutedTransaction> {
        let arg = self.transaction_input(&input)?;
        from_js(self.call(names::SIGN_AND_EXECUTE_TRANSACTION, "signAndExecuteTransaction", Some(arg)).await?)
    }

    async fn sign_personal_message(&self, input: SignPersonalMessageInput) -> WalletResult<SignedPersonalMessage> {
        let arg = Object::new();
        let message = Uint8Array::from(input.message.as_slice());
        Reflect::set(&arg, &JsValue::from_str("message"), &message).map_err(js_error)?;
        Reflect::set(&arg, &JsValue::from_str("account"), &self.raw_account(&input.account)?).map_err(js_error)?;
        from_js(self.call(names::SIGN_PERSONAL_MESSAGE, "signPersonalMessage", Some(arg.into())).await?)
    }

    fn on_change(&self, listener: ChangeListener) -> WalletResult<Subscription> {
        let (this, on) = self.method(names::EVENTS, "on")?;
        let callback = Closure::wrap(Box::new(move |properties: JsValue| {
            let raw = get(&properties, "accounts");
            let accounts = if raw.is_undefined() {
                None
            } else {
                Some(accounts_from_js(&raw).into_iter().map(|(_, a)| a).collect())
            };
            listener(WalletChange { accounts });
        }) as Box<dyn FnMut(JsValue)>);

        let off = on
            .call2(&this, &JsValue::from_str("change"), callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Subscription::new(move || {
            if let Some(off) = off.dyn_ref::<Function>() {
                let _ = off.call0(&JsValue::NULL);
            }
            drop(callback);
        }))
    }
}

/// Build a `Wallet` around a wallet-standard JS object. Features are the keys
/// of its `features` map.
pub fn wallet_from_js(raw: JsValue) -> Result<Wallet, JsValue> {
    let name = get(&raw, "name").as_string().ok_or_else(|| JsValue::from_str("wallet has no name"))?;
    let mut info = WalletInfo::new(name);
    if let Some(version) = get(&raw, "version").as_string() {
        info = info.with_version(version);
    }
    if let Some(icon) = get(&raw, "icon").as_string() {
        info = info.with_icon(icon);
    }
    let chains = get(&raw, "chains");
    if Array::is_array(&chains) {
        info = info.with_chains(Array::from(&chains).iter().filter_map(|c| c.as_string()));
    }
    let features = get(&raw, "features");
    let keys: Vec<String> = if features.is_object() {
        Object::keys(features.unchecked_ref::<Object>()).iter().filter_map(|k| k.as_string()).collect()
    } else {
        Vec::new()
    };
    let exposes_accounts = Array::is_array(&get(&raw, "accounts"));
    info = info.with_features(Feature::from_wallet_standard(keys, exposes_accounts));
    Ok(Wallet::new(info, JsWalletBackend::new(raw)))
}
