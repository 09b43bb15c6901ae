//! Core types shared by every layer: features, accounts, wallets, subscriptions

pub mod account;
pub mod features;
pub mod subscription;
pub mod wallet;

pub use account::{chain_family, Account};
pub use features::{defaults, Feature};
pub use subscription::Subscription;
pub use wallet::{
    Capabilities, ChangeListener, ConnectInput, ConnectOutput, ExecutedTransaction, SignPersonalMessageInput,
    SignTransactionInput, SignedPersonalMessage, SignedTransaction, Wallet, WalletBackend, WalletChange,
    WalletError, WalletInfo, WalletResult,
};
