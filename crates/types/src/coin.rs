//! Single-denomination coin amounts

use crate::ratio::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer amount in the smallest unit of a denomination.
pub type Amount = u128;

/// Denominations are 3..=128 characters, start with a letter and
/// otherwise use `[a-zA-Z0-9/:._-]`.
pub const MIN_DENOM_LEN: usize = 3;
pub const MAX_DENOM_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinError {
    #[error("invalid denomination: {0:?}")]
    InvalidDenom(String),
    #[error("denomination mismatch: expected {expected}, got {actual}")]
    DenomMismatch { expected: String, actual: String },
    #[error("insufficient amount: {available}{denom} < {requested}{denom}")]
    Underflow {
        denom: String,
        available: Amount,
        requested: Amount,
    },
    #[error("amount overflow in {0}")]
    Overflow(String),
}

/// Check a denomination string against the naming rules.
pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let len_ok = (MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&denom.len());
    let starts_alpha = denom.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let charset_ok = denom
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));

    if len_ok && starts_alpha && charset_ok {
        Ok(())
    } else {
        Err(CoinError::InvalidDenom(denom.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn zero(denom: impl Into<String>) -> Self {
        Self::new(denom, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn validate(&self) -> Result<(), CoinError> {
        validate_denom(&self.denom)
    }

    fn ensure_same_denom(&self, other: &Coin) -> Result<(), CoinError> {
        if self.denom != other.denom {
            return Err(CoinError::DenomMismatch {
                expected: self.denom.clone(),
                actual: other.denom.clone(),
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Coin) -> Result<Coin, CoinError> {
        self.ensure_same_denom(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| CoinError::Overflow(self.denom.clone()))?;
        Ok(Coin::new(self.denom.clone(), amount))
    }

    pub fn checked_sub(&self, other: &Coin) -> Result<Coin, CoinError> {
        self.ensure_same_denom(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| CoinError::Underflow {
                denom: self.denom.clone(),
                available: self.amount,
                requested: other.amount,
            })?;
        Ok(Coin::new(self.denom.clone(), amount))
    }

    /// Same-denomination coin holding `floor(amount * ratio)`.
    pub fn mul_ratio_truncate(&self, ratio: Ratio) -> Coin {
        Coin::new(self.denom.clone(), ratio.mul_truncate(self.amount))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denom_rules() {
        assert!(validate_denom("uipn").is_ok());
        assert!(validate_denom("ibc/27394FB0").is_ok());
        assert!(validate_denom("ab").is_err());
        assert!(validate_denom("1ipn").is_err());
        assert!(validate_denom("ipn coin").is_err());
        assert!(validate_denom("").is_err());
    }

    #[test]
    fn arithmetic_is_checked() {
        let a = Coin::new("uipn", 10);
        let b = Coin::new("uipn", 4);
        assert_eq!(a.checked_sub(&b).unwrap(), Coin::new("uipn", 6));
        assert_eq!(a.checked_add(&b).unwrap(), Coin::new("uipn", 14));
        assert!(matches!(b.checked_sub(&a), Err(CoinError::Underflow { .. })));
        assert!(matches!(
            a.checked_add(&Coin::new("other", 1)),
            Err(CoinError::DenomMismatch { .. })
        ));
        assert!(matches!(
            Coin::new("uipn", u128::MAX).checked_add(&b),
            Err(CoinError::Overflow(_))
        ));
    }

    #[test]
    fn ratio_scaling_keeps_denom() {
        let c = Coin::new("uipn", 1_001);
        let half = c.mul_ratio_truncate(Ratio::from_percent(50));
        assert_eq!(half, Coin::new("uipn", 500));
        assert_eq!(c.to_string(), "1001uipn");
    }
}
