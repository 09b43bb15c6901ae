//! Crate error type

use crate::core::{Feature, WalletError};
use crate::store::ConnectionStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DappKitError {
    #[error("No wallet connected")]
    NoWalletConnected,

    #[error("No account selected")]
    NoAccountSelected,

    #[error("Wallet {wallet} does not support {feature}")]
    FeatureUnsupported { wallet: String, feature: Feature },

    #[error("Account not found in connected accounts: {0}")]
    AccountNotFound(String),

    #[error("Wallet not registered: {0}")]
    WalletNotFound(String),

    #[error("Could not find {0}. Provide it when building the kit.")]
    MissingContext(&'static str),

    #[error("Invalid connection transition: {from} -> {to}")]
    InvalidTransition { from: ConnectionStatus, to: ConnectionStatus },

    #[error("Connection attempt superseded by a newer connect or disconnect")]
    ConnectionSuperseded,

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Client error: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, DappKitError>;
