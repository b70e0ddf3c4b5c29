use ippan_types::Ratio;
use serde::{Deserialize, Serialize};

/// Issuance bookkeeping carried from block to block.
///
/// Written by the inflation calculator; the distribution path only stores
/// and loads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minter {
    /// Current annual inflation rate.
    pub inflation: Ratio,
    /// Tokens expected to be minted over the next year at `inflation`.
    pub annual_provisions: Ratio,
}

impl Minter {
    pub fn new(inflation: Ratio, annual_provisions: Ratio) -> Self {
        Self {
            inflation,
            annual_provisions,
        }
    }

    /// Genesis minter: a starting rate and no provisions yet.
    pub fn initial(inflation: Ratio) -> Self {
        Self::new(inflation, Ratio::ZERO)
    }
}
