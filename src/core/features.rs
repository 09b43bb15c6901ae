//! Feature tags and well-known constants
//!
//! Centralized registry for wallet-standard feature names, wallet names and
//! storage keys. Use `Feature` variants for type-safe capability checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named wallet capability.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Feature {
    Connect,
    Disconnect,
    Accounts,
    Events,
    SignTransaction,
    SignAndExecuteTransaction,
    SignPersonalMessage,
    GetCapabilities,
    /// Any feature this crate does not drive itself.
    Other(String),
}

impl Feature {
    pub fn as_str(&self) -> &str {
        match self {
            Feature::Connect => names::CONNECT,
            Feature::Disconnect => names::DISCONNECT,
            Feature::Accounts => names::ACCOUNTS,
            Feature::Events => names::EVENTS,
            Feature::SignTransaction => names::SIGN_TRANSACTION,
            Feature::SignAndExecuteTransaction => names::SIGN_AND_EXECUTE_TRANSACTION,
            Feature::SignPersonalMessage => names::SIGN_PERSONAL_MESSAGE,
            Feature::GetCapabilities => names::GET_CAPABILITIES,
            Feature::Other(name) => name,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            names::CONNECT => Feature::Connect,
            names::DISCONNECT => Feature::Disconnect,
            names::ACCOUNTS => Feature::Accounts,
            names::EVENTS => Feature::Events,
            names::SIGN_TRANSACTION => Feature::SignTransaction,
            names::SIGN_AND_EXECUTE_TRANSACTION => Feature::SignAndExecuteTransaction,
            names::SIGN_PERSONAL_MESSAGE => Feature::SignPersonalMessage,
            names::GET_CAPABILITIES => Feature::GetCapabilities,
            other => Feature::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Feature> for String {
    fn from(feature: Feature) -> Self {
        feature.as_str().to_string()
    }
}

impl From<String> for Feature {
    fn from(value: String) -> Self {
        Feature::parse(&value)
    }
}

impl From<&str> for Feature {
    fn from(value: &str) -> Self {
        Feature::parse(value)
    }
}

impl Feature {
    /// Feature set of a wallet-standard object: its `features` keys, plus
    /// `Accounts` when it exposes an `accounts` array. Wallet-standard has no
    /// accounts feature key; the property is the capability.
    pub fn from_wallet_standard<I, S>(keys: I, exposes_accounts: bool) -> Vec<Feature>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut features: Vec<Feature> = keys.into_iter().map(|k| Feature::parse(k.as_ref())).collect();
        if exposes_accounts && !features.contains(&Feature::Accounts) {
            features.push(Feature::Accounts);
        }
        features
    }
}

/// Wire names of the features (wallet-standard keys). `ACCOUNTS` is this
/// crate's tag for the `accounts` property, not a key wallets declare.
pub mod names {
    pub const CONNECT: &str = "standard:connect";
    pub const DISCONNECT: &str = "standard:disconnect";
    pub const ACCOUNTS: &str = "standard:accounts";
    pub const EVENTS: &str = "standard:events";
    pub const SIGN_TRANSACTION: &str = "sui:signTransaction";
    pub const SIGN_AND_EXECUTE_TRANSACTION: &str = "sui:signAndExecuteTransaction";
    pub const SIGN_PERSONAL_MESSAGE: &str = "sui:signPersonalMessage";
    pub const GET_CAPABILITIES: &str = "sui:getCapabilities";
}

/// Minimal feature set a wallet must expose to be surfaced at all.
pub const REQUIRED_FEATURES: &[Feature] = &[Feature::Connect, Feature::Disconnect, Feature::Accounts];

/// Either of these qualifies a wallet under the desktop policy.
pub const SIGN_FEATURES: &[Feature] = &[Feature::SignTransaction, Feature::SignAndExecuteTransaction];

/// Chain family and wallet defaults
pub mod defaults {
    pub const CHAIN_FAMILY: &str = "sui";
    pub const NETWORK: &str = "mainnet";

    pub const SUI_WALLET_NAME: &str = "Sui Wallet";
    /// Popup-authenticated wallet that works without extension injection.
    pub const SLUSH_WALLET_NAME: &str = "Slush";

    pub const PREFERRED_WALLETS: &[&str] = &[SUI_WALLET_NAME, SLUSH_WALLET_NAME];

    pub const STORAGE_KEY: &str = "sui-dapp-kit:wallet-connection-info";

    /// Viewport width at or below which a touch device counts as mobile.
    pub const MOBILE_MAX_WIDTH: f64 = 768.0;
}
