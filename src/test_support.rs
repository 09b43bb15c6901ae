//! Fixtures for unit tests

use crate::core::{Account, ConnectInput, ConnectOutput, Feature, Wallet, WalletBackend, WalletInfo, WalletResult};
use async_trait::async_trait;

/// Backend that connects with a fixed account list.
pub struct FixedAccounts(pub Vec<Account>);

#[async_trait(?Send)]
impl WalletBackend for FixedAccounts {
    async fn connect(&self, _input: ConnectInput) -> WalletResult<ConnectOutput> {
        Ok(ConnectOutput { accounts: self.0.clone(), supported_intents: None })
    }

    fn accounts(&self) -> Vec<Account> {
        self.0.clone()
    }
}

pub fn wallet(name: &str, features: &[Feature]) -> Wallet {
    Wallet::new(WalletInfo::new(name).with_features(features.iter().cloned()), FixedAccounts(Vec::new()))
}

pub fn full_wallet(name: &str) -> Wallet {
    wallet(
        name,
        &[Feature::Connect, Feature::Disconnect, Feature::Accounts, Feature::Events, Feature::SignTransaction],
    )
}

pub fn sui_account(address: &str) -> Account {
    Account::new(address, vec!["sui:mainnet".into()])
}
