//! Wallet-standard `getWallets()` API as a `WalletRegistry`
//!
//! The same JS wallet object always maps to the same `Wallet` handle
//! (`Object.is`), so identity checks in the store hold across events.

use super::log;
use super::wallet::wallet_from_js;
use crate::core::{Subscription, Wallet};
use crate::registry::{RegistryEvent, RegistryHandler, WalletRegistry};
use js_sys::{Array, Function, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

pub struct JsRegistry {
    api: JsValue,
    known: Rc<RefCell<Vec<(JsValue, Wallet)>>>,
}

impl JsRegistry {
    /// `api` is the object returned by `getWallets()`.
    pub fn new(api: JsValue) -> Self {
        Self { api, known: Rc::new(RefCell::new(Vec::new())) }
    }

    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.api, &JsValue::from_str(name)).ok()?.dyn_into::<Function>().ok()
    }
}

fn resolve(known: &RefCell<Vec<(JsValue, Wallet)>>, raw: &JsValue) -> Option<Wallet> {
    if let Some((_, wallet)) = known.borrow().iter().find(|(js, _)| Object::is(js, raw)) {
        return Some(wallet.clone());
    }
    match wallet_from_js(raw.clone()) {
        Ok(wallet) => {
            known.borrow_mut().push((raw.clone(), wallet.clone()));
            Some(wallet)
        }
        Err(e) => {
            log!("[dappkit] skipping malformed wallet: {:?}", e);
            None
        }
    }
}

impl WalletRegistry for JsRegistry {
    fn get(&self) -> Vec<Wallet> {
        let Some(get) = self.method("get") else { return Vec::new() };
        let Ok(list) = get.call0(&self.api) else { return Vec::new() };
        Array::from(&list).iter().filter_map(|raw| resolve(&self.known, &raw)).collect()
    }

    /// The handler sees the first wallet of each event.
    fn on(&self, event: RegistryEvent, handler: RegistryHandler) -> Subscription {
        let Some(on) = self.method("on") else { return Subscription::noop() };
        let known = self.known.clone();
        let callback = Closure::wrap(Box::new(move |raw: JsValue| {
            let Some(wallet) = resolve(&known, &raw) else { return };
            handler(&wallet);
            if event == RegistryEvent::Unregister {
                known.borrow_mut().retain(|(js, _)| !Object::is(js, &raw));
            }
        }) as Box<dyn FnMut(JsValue)>);

        let off = match on.call2(&self.api, &JsValue::from_str(event.as_str()), callback.as_ref().unchecked_ref()) {
            Ok(off) => off,
            Err(e) => {
                log!("[dappkit] registry.on({}) failed: {:?}", event, e);
                return Subscription::noop();
            }
        };
        Subscription::new(move || {
            if let Some(off) = off.dyn_ref::<Function>() {
                let _ = off.call0(&JsValue::NULL);
            }
            drop(callback);
        })
    }
}
