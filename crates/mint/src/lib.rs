//! IPPAN Mint Module
//!
//! Owns the minter record and the distribution params, and splits each
//! block's minted coin between:
//! - the fee collector (staking rewards)
//! - weighted funded addresses
//! - the community pool, which also receives every rounding remainder
//!
//! Balances move through the sinks in `ippan-treasury`; records persist
//! through any `ippan-storage` backend.

pub mod config;
pub mod distribution;
pub mod errors;
pub mod keeper;
pub mod keys;
pub mod minter;
pub mod params;

pub use config::{ConfigError, MintConfig};
pub use distribution::{get_proportion, DistributionContext, DistributionOutcome, FundedPayout};
pub use errors::{ErrorKind, MintError, Result};
pub use keeper::MintKeeper;
pub use minter::Minter;
pub use params::{DistributionProportions, Params, ParamsError, WeightedAddress};

/// Mint module version (for API introspection)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
