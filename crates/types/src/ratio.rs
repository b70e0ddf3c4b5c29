//! Fixed-point ratios
//!
//! Proportions and weights are stored as unsigned integers scaled by 10^18.
//! Scaling an amount always truncates toward zero and never touches binary
//! floating point, so every node replaying a block derives identical shares.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places carried by a [`Ratio`].
pub const RATIO_DECIMALS: u32 = 18;

/// Atoms in `1.0`.
pub const RATIO_ONE_ATOMS: u128 = 10u128.pow(RATIO_DECIMALS);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatioError {
    #[error("invalid decimal: {0}")]
    Parse(#[from] rust_decimal::Error),
    #[error("ratio must not be negative: {0}")]
    Negative(String),
    #[error("ratio supports at most 18 decimal places, got {0}")]
    TooPrecise(u32),
    #[error("ratio arithmetic overflow")]
    Overflow,
}

/// Non-negative fixed-point number with 18 decimal places.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Ratio {
    atoms: u128,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { atoms: 0 };
    pub const ONE: Ratio = Ratio {
        atoms: RATIO_ONE_ATOMS,
    };

    pub const fn from_atoms(atoms: u128) -> Self {
        Self { atoms }
    }

    /// `percent / 100`, e.g. `from_percent(40)` is `0.4`.
    pub const fn from_percent(percent: u64) -> Self {
        Self {
            atoms: percent as u128 * (RATIO_ONE_ATOMS / 100),
        }
    }

    /// `bps / 10_000`.
    pub const fn from_bps(bps: u64) -> Self {
        Self {
            atoms: bps as u128 * (RATIO_ONE_ATOMS / 10_000),
        }
    }

    pub const fn atoms(&self) -> u128 {
        self.atoms
    }

    pub const fn is_zero(&self) -> bool {
        self.atoms == 0
    }

    pub fn checked_add(self, other: Ratio) -> Option<Ratio> {
        self.atoms.checked_add(other.atoms).map(Ratio::from_atoms)
    }

    pub fn checked_sub(self, other: Ratio) -> Option<Ratio> {
        self.atoms.checked_sub(other.atoms).map(Ratio::from_atoms)
    }

    /// `floor(amount * self)`, computed exactly.
    ///
    /// Fails only when the result does not fit in `u128`, which cannot happen
    /// for ratios no greater than one.
    pub fn checked_mul_truncate(&self, amount: u128) -> Result<u128, RatioError> {
        let product = BigUint::from(amount) * BigUint::from(self.atoms);
        (product / BigUint::from(RATIO_ONE_ATOMS))
            .to_u128()
            .ok_or(RatioError::Overflow)
    }

    /// `floor(amount * self)` for ratios in `[0, 1]`.
    ///
    /// Ratios above one saturate at `u128::MAX` rather than wrap.
    pub fn mul_truncate(&self, amount: u128) -> u128 {
        self.checked_mul_truncate(amount).unwrap_or(u128::MAX)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.atoms / RATIO_ONE_ATOMS;
        let frac = self.atoms % RATIO_ONE_ATOMS;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl TryFrom<Decimal> for Ratio {
    type Error = RatioError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(RatioError::Negative(value.to_string()));
        }
        let scale = value.scale();
        if scale > RATIO_DECIMALS {
            return Err(RatioError::TooPrecise(scale));
        }
        value
            .mantissa()
            .unsigned_abs()
            .checked_mul(10u128.pow(RATIO_DECIMALS - scale))
            .map(Ratio::from_atoms)
            .ok_or(RatioError::Overflow)
    }
}

impl FromStr for Ratio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str_exact(s.trim())?;
        Ratio::try_from(decimal.normalize())
    }
}

impl TryFrom<String> for Ratio {
    type Error = RatioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ratio> for String {
    fn from(value: Ratio) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_and_displays_canonical_form() {
        let r: Ratio = "0.4".parse().unwrap();
        assert_eq!(r, Ratio::from_percent(40));
        assert_eq!(r.to_string(), "0.4");
        assert_eq!(Ratio::ONE.to_string(), "1");
        assert_eq!("0.000000000000000001".parse::<Ratio>().unwrap().atoms(), 1);
        assert_eq!("2.50".parse::<Ratio>().unwrap().to_string(), "2.5");
    }

    #[test]
    fn rejects_negative_and_over_precise_input() {
        assert!(matches!("-0.1".parse::<Ratio>(), Err(RatioError::Negative(_))));
        assert!(matches!(
            "0.0000000000000000001".parse::<Ratio>(),
            Err(RatioError::TooPrecise(19))
        ));
        assert!(matches!("abc".parse::<Ratio>(), Err(RatioError::Parse(_))));
    }

    #[test]
    fn truncates_toward_zero() {
        let third: Ratio = "0.333333333333333333".parse().unwrap();
        assert_eq!(third.mul_truncate(10), 3);
        assert_eq!(Ratio::from_percent(40).mul_truncate(1_000), 400);
        assert_eq!(Ratio::from_percent(50).mul_truncate(3), 1);
        assert_eq!(Ratio::ZERO.mul_truncate(u128::MAX), 0);
        assert_eq!(Ratio::ONE.mul_truncate(u128::MAX), u128::MAX);
    }

    #[test]
    fn overflow_is_reported() {
        let two = Ratio::from_percent(200);
        assert_eq!(two.checked_mul_truncate(u128::MAX), Err(RatioError::Overflow));
    }

    #[test]
    fn serde_uses_decimal_string() {
        let r = Ratio::from_bps(2_500);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"0.25\"");
        assert_eq!(serde_json::from_str::<Ratio>(&json).unwrap(), r);
    }

    proptest! {
        #[test]
        fn never_exceeds_input_for_unit_ratios(
            amount in any::<u128>(),
            atoms in 0u128..=RATIO_ONE_ATOMS,
        ) {
            let share = Ratio::from_atoms(atoms).mul_truncate(amount);
            prop_assert!(share <= amount);
        }

        #[test]
        fn display_parse_is_lossless(atoms in 0u128..=1_000 * RATIO_ONE_ATOMS) {
            let r = Ratio::from_atoms(atoms);
            prop_assert_eq!(r.to_string().parse::<Ratio>().unwrap(), r);
        }
    }
}
