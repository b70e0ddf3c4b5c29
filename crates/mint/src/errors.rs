use crate::params::ParamsError;
use ippan_storage::StorageError;
use ippan_treasury::TransferError;
use ippan_types::{AddressError, CoinError};
use thiserror::Error;

/// Errors that can occur in the mint module.
#[derive(Debug, Error)]
pub enum MintError {
    /// Parameters rejected at the configuration boundary; stored state is unchanged.
    #[error("invalid mint params: {0}")]
    Validation(#[from] ParamsError),

    /// A configured beneficiary address does not decode.
    #[error("funded address {address:?} is malformed: {source}")]
    MalformedFundedAddress {
        address: String,
        #[source]
        source: AddressError,
    },

    /// A persisted record exists but cannot be decoded.
    #[error("stored {record} record is corrupted: {source}")]
    CorruptedRecord {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Distribution arithmetic broke the conservation invariant.
    #[error("distribution invariant violated: {0}")]
    InvariantViolation(String),

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("unauthorized: expected authority {expected}, got {actual}")]
    Unauthorized { expected: String, actual: String },

    #[error("invalid minted coin: {0}")]
    InvalidCoin(#[from] CoinError),
}

/// Coarse classification the host uses to decide abort-vs-report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Critical,
    Transfer,
    Storage,
    Unauthorized,
    InvalidInput,
}

impl MintError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MintError::Validation(_) => ErrorKind::Validation,
            MintError::MalformedFundedAddress { .. }
            | MintError::CorruptedRecord { .. }
            | MintError::InvariantViolation(_) => ErrorKind::Critical,
            MintError::Transfer(_) => ErrorKind::Transfer,
            MintError::Storage(_) => ErrorKind::Storage,
            MintError::Unauthorized { .. } => ErrorKind::Unauthorized,
            MintError::InvalidCoin(_) => ErrorKind::InvalidInput,
        }
    }

    /// Critical errors signal corrupted or malicious configuration and must
    /// abort the enclosing block.
    pub fn is_critical(&self) -> bool {
        self.kind() == ErrorKind::Critical
    }
}

pub type Result<T> = std::result::Result<T, MintError>;
