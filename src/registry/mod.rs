//! Registry adapter: read/subscribe view over the platform's wallet discovery
//!
//! ```text
//! wallet announces itself ──▶ WalletRegistry ──(register/unregister)──▶ handlers
//!                                  │
//!                                  └── get() → snapshot of every announced wallet
//! ```
//!
//! The adapter owns the canonical wallet list. Consumers only read snapshots and
//! subscribe; they never mutate the registry.

use crate::core::{Subscription, Wallet};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryEvent {
    Register,
    Unregister,
}

impl RegistryEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryEvent::Register => "register",
            RegistryEvent::Unregister => "unregister",
        }
    }
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Called once per wallet carried by the event.
pub type RegistryHandler = Rc<dyn Fn(&Wallet)>;

pub trait WalletRegistry {
    /// Synchronous snapshot of all currently registered wallets.
    fn get(&self) -> Vec<Wallet>;

    /// Subscribe to an event; dropping the returned handle unsubscribes.
    fn on(&self, event: RegistryEvent, handler: RegistryHandler) -> Subscription;
}

// =============================================================================
// MEMORY REGISTRY
// =============================================================================

#[derive(Default)]
struct RegistryState {
    wallets: Vec<Wallet>,
    handlers: Vec<(u64, RegistryEvent, RegistryHandler)>,
    next_id: u64,
}

/// In-process registry. Wallets announce themselves with `register` and leave
/// with `unregister`.
#[derive(Clone, Default)]
pub struct MemoryRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, wallet: Wallet) {
        self.state.borrow_mut().wallets.push(wallet.clone());
        tracing::debug!(wallet = wallet.name(), "registry: register");
        self.emit(RegistryEvent::Register, &wallet);
    }

    /// Remove a wallet by identity. Returns false if it was not registered.
    pub fn unregister(&self, wallet: &Wallet) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let before = state.wallets.len();
            state.wallets.retain(|w| !w.ptr_eq(wallet));
            state.wallets.len() != before
        };
        if removed {
            tracing::debug!(wallet = wallet.name(), "registry: unregister");
            self.emit(RegistryEvent::Unregister, wallet);
        }
        removed
    }

    pub fn handler_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    fn emit(&self, event: RegistryEvent, wallet: &Wallet) {
        // Handlers read the registry back, so release the borrow before calling them
        let handlers: Vec<RegistryHandler> = self
            .state
            .borrow()
            .handlers
            .iter()
            .filter(|(_, e, _)| *e == event)
            .map(|(_, _, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(wallet);
        }
    }
}

impl WalletRegistry for MemoryRegistry {
    fn get(&self) -> Vec<Wallet> {
        self.state.borrow().wallets.clone()
    }

    fn on(&self, event: RegistryEvent, handler: RegistryHandler) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.handlers.push((id, event, handler));
            id
        };
        let weak = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().handlers.retain(|(h, _, _)| *h != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::wallet;
    use std::cell::Cell;

    #[test]
    fn snapshot_tracks_register_and_unregister() {
        let registry = MemoryRegistry::new();
        let a = wallet("A", &[]);
        let b = wallet("B", &[]);
        registry.register(a.clone());
        registry.register(b.clone());
        assert_eq!(registry.get().len(), 2);

        assert!(registry.unregister(&a));
        assert!(!registry.unregister(&a));
        let names: Vec<_> = registry.get().iter().map(|w| w.name().to_string()).collect();
        assert_eq!(names, vec!["B"]);
    }

    #[test]
    fn handlers_receive_events_until_unsubscribed() {
        let registry = MemoryRegistry::new();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let sub = registry.on(RegistryEvent::Register, Rc::new(move |_: &Wallet| s.set(s.get() + 1)));

        registry.register(wallet("A", &[]));
        assert_eq!(seen.get(), 1);

        sub.unsubscribe();
        assert_eq!(registry.handler_count(), 0);
        registry.register(wallet("B", &[]));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn handler_may_read_registry() {
        let registry = MemoryRegistry::new();
        let count = Rc::new(Cell::new(0));
        let (r, c) = (registry.clone(), count.clone());
        let _sub = registry.on(RegistryEvent::Register, Rc::new(move |_: &Wallet| c.set(r.get().len())));
        registry.register(wallet("A", &[]));
        registry.register(wallet("B", &[]));
        assert_eq!(count.get(), 2);
    }
}
