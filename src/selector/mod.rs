//! Wallet filter/selector: pure functions, no side effects
//!
//! | Function | Purpose |
//! |----------|---------|
//! | `has_required_features` | minimal capability set every surfaced wallet needs |
//! | `accept_by_policy` | desktop vs mobile acceptance |
//! | `order_wallets` | preferred names first, then discovery order |
//! | `select_account` | account to activate from a connected set |
//! | `filter_to_chain_family` | keep accounts on e.g. `sui:*` chains |
//! | `registered_wallets` | registry snapshot → filtered, ordered list |

pub mod environment;

pub use environment::{resolve_policy, EnvironmentSignals};

use crate::core::features::{defaults, REQUIRED_FEATURES, SIGN_FEATURES};
use crate::core::{Account, Feature, Wallet};
use crate::registry::WalletRegistry;
use std::rc::Rc;

/// Caller-supplied wallet predicate.
pub type WalletFilter = Rc<dyn Fn(&Wallet) -> bool>;

/// Acceptance policy for surfaced wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletPolicy {
    #[default]
    Desktop,
    Mobile,
}

impl WalletPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletPolicy::Desktop => "desktop",
            WalletPolicy::Mobile => "mobile",
        }
    }

    pub fn from_mobile_flag(is_mobile: bool) -> Self {
        if is_mobile { WalletPolicy::Mobile } else { WalletPolicy::Desktop }
    }

    /// The policy as a reusable filter.
    pub fn filter(self) -> WalletFilter {
        Rc::new(move |wallet: &Wallet| accept_by_policy(wallet, self))
    }
}

pub fn has_required_features(wallet: &Wallet) -> bool {
    REQUIRED_FEATURES.iter().all(|feature| wallet.has_feature(feature))
}

pub fn accept_by_policy(wallet: &Wallet, policy: WalletPolicy) -> bool {
    if SIGN_FEATURES.iter().any(|feature| wallet.has_feature(feature)) {
        return true;
    }
    match policy {
        WalletPolicy::Desktop => false,
        // No extension injection on mobile: popup-auth wallets are enough
        WalletPolicy::Mobile => wallet.has_feature(&Feature::Connect) || wallet.name() == defaults::SLUSH_WALLET_NAME,
    }
}

/// Preferred wallets in `preferred` order, then the rest in discovery order.
/// Duplicate identifiers are dropped, keeping the first occurrence.
pub fn order_wallets<S: AsRef<str>>(wallets: &[Wallet], preferred: &[S]) -> Vec<Wallet> {
    let mut ordered: Vec<Wallet> = Vec::with_capacity(wallets.len());
    let mut push = |wallet: &Wallet| {
        if !ordered.iter().any(|w| w.name() == wallet.name()) {
            ordered.push(wallet.clone());
        }
    };
    for name in preferred {
        if let Some(wallet) = wallets.iter().find(|w| w.name() == name.as_ref()) {
            push(wallet);
        }
    }
    for wallet in wallets {
        if !preferred.iter().any(|name| name.as_ref() == wallet.name()) {
            push(wallet);
        }
    }
    ordered
}

/// The account matching `requested` if present, else the first; `None` on empty input.
pub fn select_account(accounts: &[Account], requested: Option<&str>) -> Option<Account> {
    requested
        .and_then(|address| accounts.iter().find(|a| a.address == address))
        .or_else(|| accounts.first())
        .cloned()
}

pub fn filter_to_chain_family(accounts: &[Account], family: &str) -> Vec<Account> {
    accounts.iter().filter(|a| a.is_in_chain_family(family)).cloned().collect()
}

/// Snapshot of the registry: required features, then `filter`, then ordered.
pub fn registered_wallets<S: AsRef<str>>(
    registry: &dyn WalletRegistry,
    preferred: &[S],
    filter: Option<&WalletFilter>,
) -> Vec<Wallet> {
    let surfaced: Vec<Wallet> = registry
        .get()
        .into_iter()
        .filter(|wallet| has_required_features(wallet) && filter.map_or(true, |f| f(wallet)))
        .collect();
    order_wallets(&surfaced, preferred)
}
