use ippan_types::{Address, Amount, CoinError};
use thiserror::Error;

/// Failures reported by bank and community-pool sinks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    #[error("unknown module account: {0}")]
    UnknownModule(String),

    #[error("insufficient funds in {address}: {available}{denom} < {requested}{denom}")]
    InsufficientFunds {
        address: Address,
        denom: String,
        available: Amount,
        requested: Amount,
    },

    #[error("balance overflow for {0}")]
    Overflow(String),

    #[error("invalid coin: {0}")]
    InvalidCoin(#[from] CoinError),

    #[error("transfer rejected: {0}")]
    Rejected(String),
}
