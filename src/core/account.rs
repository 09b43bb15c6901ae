//! Account: an address plus the chains it is valid on

use serde::{Deserialize, Serialize};

/// Account exposed by a connected wallet. Immutable value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    /// Chain identifiers, e.g. `"sui:mainnet"`
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Account {
    pub fn new(address: impl Into<String>, chains: Vec<String>) -> Self {
        Self { address: address.into(), chains, features: Vec::new(), label: None, icon: None }
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self { self.label = Some(label.into()); self }
    pub fn with_features(mut self, features: Vec<String>) -> Self { self.features = features; self }

    /// True if any chain's `:`-delimited prefix equals `family`.
    pub fn is_in_chain_family(&self, family: &str) -> bool {
        self.chains.iter().any(|chain| chain_family(chain) == family)
    }

    /// Chain to sign against when the caller gives none: `{family}:{network of first chain}`,
    /// falling back to `fallback_network`.
    pub fn default_chain(&self, family: &str, fallback_network: &str) -> String {
        let network = self
            .chains
            .first()
            .and_then(|chain| chain.split(':').nth(1))
            .filter(|network| !network.is_empty())
            .unwrap_or(fallback_network);
        format!("{}:{}", family, network)
    }
}

/// Prefix of a chain identifier (`"sui"` for `"sui:testnet"`).
pub fn chain_family(chain: &str) -> &str {
    chain.split(':').next().unwrap_or(chain)
}
