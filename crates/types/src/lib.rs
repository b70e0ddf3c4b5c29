//! IPPAN shared types
//!
//! Primitives used by the mint module and its collaborators:
//! - [`Coin`]: a single-denomination integer amount
//! - [`Ratio`]: 18-decimal fixed-point proportion with truncating multiply
//! - [`Address`] and [`AddressCodec`]: account identifiers and their string form

pub mod address;
pub mod coin;
pub mod ratio;

pub use address::*;
pub use coin::*;
pub use ratio::*;
