//! Kit configuration - passed from the embedding app

use crate::core::defaults;
use crate::selector::{resolve_policy, EnvironmentSignals, WalletFilter, WalletPolicy};
use std::fmt;

/// Kit configuration. The embedding app constructs this.
#[derive(Clone)]
pub struct DappKitConfig {
    pub app: String,
    pub preferred_wallets: Vec<String>,
    /// Overrides the environment-aware policy filter when set.
    pub wallet_filter: Option<WalletFilter>,
    /// Explicit mobile policy; `None` infers from the environment.
    pub mobile: Option<bool>,
    pub auto_connect: bool,
    pub storage_key: String,
    pub chain_family: String,
    pub default_network: String,
}

impl Default for DappKitConfig {
    fn default() -> Self {
        Self {
            app: String::new(),
            preferred_wallets: defaults::PREFERRED_WALLETS.iter().map(|s| s.to_string()).collect(),
            wallet_filter: None,
            mobile: None,
            auto_connect: true,
            storage_key: defaults::STORAGE_KEY.into(),
            chain_family: defaults::CHAIN_FAMILY.into(),
            default_network: defaults::NETWORK.into(),
        }
    }
}

impl DappKitConfig {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), ..Default::default() }
    }
    pub fn with_preferred_wallets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_wallets = names.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_wallet_filter(mut self, filter: WalletFilter) -> Self { self.wallet_filter = Some(filter); self }
    pub fn with_mobile(mut self, mobile: bool) -> Self { self.mobile = Some(mobile); self }
    pub fn with_auto_connect(mut self, enabled: bool) -> Self { self.auto_connect = enabled; self }
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self { self.storage_key = key.into(); self }
    pub fn with_chain_family(mut self, family: impl Into<String>) -> Self { self.chain_family = family.into(); self }
    pub fn with_default_network(mut self, network: impl Into<String>) -> Self { self.default_network = network.into(); self }

    pub fn policy(&self, signals: Option<&EnvironmentSignals>) -> WalletPolicy {
        resolve_policy(self.mobile, signals)
    }

    /// Custom filter if given, else the policy filter for this environment.
    pub fn effective_filter(&self, signals: Option<&EnvironmentSignals>) -> WalletFilter {
        match &self.wallet_filter {
            Some(filter) => filter.clone(),
            None => self.policy(signals).filter(),
        }
    }
}

impl fmt::Debug for DappKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DappKitConfig")
            .field("app", &self.app)
            .field("preferred_wallets", &self.preferred_wallets)
            .field("wallet_filter", &self.wallet_filter.as_ref().map(|_| "<fn>"))
            .field("mobile", &self.mobile)
            .field("auto_connect", &self.auto_connect)
            .field("storage_key", &self.storage_key)
            .field("chain_family", &self.chain_family)
            .field("default_network", &self.default_network)
            .finish()
    }
}
