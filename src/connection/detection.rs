//! Registry watcher: keeps the store's wallet list in sync with discovery
//!
//! ```text
//! mount ──▶ snapshot ──▶ set_wallet_registered
//! register   event ──▶ snapshot ──▶ set_wallet_registered
//! unregister event ──▶ snapshot ──▶ set_wallet_unregistered(removed) ──▶ on_disconnect
//! unmount/drop ──▶ both subscriptions released
//! ```
//!
//! Handlers hold the registry weakly; the registry owns the handlers and the
//! detection handle keeps the registry alive.

use crate::core::{Subscription, Wallet};
use crate::registry::{RegistryEvent, WalletRegistry};
use crate::selector::{registered_wallets, WalletFilter};
use crate::store::WalletStore;
use std::rc::{Rc, Weak};

/// Called with the removed wallet when its unregistration dropped the
/// current connection.
pub type DisconnectHook = Rc<dyn Fn(&Wallet)>;

struct Snapshotter {
    registry: Weak<dyn WalletRegistry>,
    preferred: Vec<String>,
    filter: Option<WalletFilter>,
}

impl Snapshotter {
    fn wallets(&self) -> Option<Vec<Wallet>> {
        let registry = self.registry.upgrade()?;
        Some(registered_wallets(registry.as_ref(), &self.preferred, self.filter.as_ref()))
    }
}

/// Live registry watch. Dropping it unsubscribes.
#[must_use = "dropping WalletDetection stops watching the registry"]
pub struct WalletDetection {
    subscriptions: Vec<Subscription>,
    registry: Rc<dyn WalletRegistry>,
}

impl WalletDetection {
    pub fn mount(
        registry: Rc<dyn WalletRegistry>,
        store: WalletStore,
        preferred: Vec<String>,
        filter: Option<WalletFilter>,
    ) -> Self {
        Self::mount_with_hook(registry, store, preferred, filter, None)
    }

    /// As `mount`, running `on_disconnect` after an unregister disconnects.
    pub fn mount_with_hook(
        registry: Rc<dyn WalletRegistry>,
        store: WalletStore,
        preferred: Vec<String>,
        filter: Option<WalletFilter>,
        on_disconnect: Option<DisconnectHook>,
    ) -> Self {
        let snapshotter = Rc::new(Snapshotter { registry: Rc::downgrade(&registry), preferred, filter });
        store.set_wallet_registered(registered_wallets(
            registry.as_ref(),
            &snapshotter.preferred,
            snapshotter.filter.as_ref(),
        ));

        let (snap, st) = (snapshotter.clone(), store.clone());
        let on_register = registry.on(
            RegistryEvent::Register,
            Rc::new(move |_added: &Wallet| {
                if let Some(wallets) = snap.wallets() {
                    st.set_wallet_registered(wallets);
                }
            }),
        );

        let (snap, st) = (snapshotter, store);
        let on_unregister = registry.on(
            RegistryEvent::Unregister,
            Rc::new(move |removed: &Wallet| {
                let Some(wallets) = snap.wallets() else { return };
                if st.set_wallet_unregistered(wallets, removed) {
                    if let Some(hook) = &on_disconnect {
                        hook(removed);
                    }
                }
            }),
        );

        tracing::debug!("detection: mounted");
        Self { subscriptions: vec![on_register, on_unregister], registry }
    }

    pub fn registry(&self) -> &Rc<dyn WalletRegistry> {
        &self.registry
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for WalletDetection {
    fn drop(&mut self) {
        if !self.subscriptions.is_empty() {
            self.subscriptions.clear();
            tracing::debug!("detection: unmounted");
        }
    }
}
