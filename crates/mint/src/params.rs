//! Mint distribution parameters
//!
//! Stored under the mint keyspace and changed only by the module authority.
//! Every candidate goes through [`Params::validate`] before it is persisted.

use ippan_types::{validate_denom, CoinError, Ratio};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("invalid mint denom: {0}")]
    InvalidDenom(#[from] CoinError),

    #[error("{name} proportion must be within [0, 1], got {value}")]
    ProportionOutOfRange { name: &'static str, value: Ratio },

    #[error("staking + funded addresses proportions must not exceed 1, got {total}")]
    ProportionsExceedOne { total: String },

    #[error("funded address at position {0} is empty")]
    EmptyFundedAddress(usize),

    #[error("funded address {0} is listed more than once")]
    DuplicateFundedAddress(String),

    #[error("weight of funded address {address} must be within (0, 1], got {weight}")]
    InvalidWeight { address: String, weight: Ratio },

    #[error("funded address weights must sum to 1, got {total}")]
    WeightsDoNotSumToOne { total: String },
}

/// Split of each minted coin between the top-level destinations.
///
/// Whatever the two proportions leave over goes to the community pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionProportions {
    pub staking: Ratio,
    pub funded_addresses: Ratio,
}

impl DistributionProportions {
    pub fn new(staking: Ratio, funded_addresses: Ratio) -> Self {
        Self {
            staking,
            funded_addresses,
        }
    }

    /// Share left for the community pool, `None` if the proportions exceed one.
    pub fn community_pool(&self) -> Option<Ratio> {
        Ratio::ONE
            .checked_sub(self.staking)?
            .checked_sub(self.funded_addresses)
    }
}

/// Beneficiary of the funded-addresses share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedAddress {
    pub address: String,
    pub weight: Ratio,
}

impl WeightedAddress {
    pub fn new(address: impl Into<String>, weight: Ratio) -> Self {
        Self {
            address: address.into(),
            weight,
        }
    }
}

/// Mint module parameters.
///
/// The zero value (`Params::default()`) means "no distribution configured":
/// no denom check and the whole minted coin ends up in the community pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub mint_denom: String,
    pub distribution_proportions: DistributionProportions,
    /// Paid in list order.
    pub funded_addresses: Vec<WeightedAddress>,
}

impl Params {
    pub fn new(
        mint_denom: impl Into<String>,
        distribution_proportions: DistributionProportions,
        funded_addresses: Vec<WeightedAddress>,
    ) -> Self {
        Self {
            mint_denom: mint_denom.into(),
            distribution_proportions,
            funded_addresses,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        validate_denom(&self.mint_denom)?;
        self.validate_proportions()?;
        self.validate_funded_addresses()
    }

    fn validate_proportions(&self) -> Result<(), ParamsError> {
        let p = &self.distribution_proportions;
        for (name, value) in [("staking", p.staking), ("funded addresses", p.funded_addresses)] {
            if value > Ratio::ONE {
                return Err(ParamsError::ProportionOutOfRange { name, value });
            }
        }

        if p.community_pool().is_none() {
            let total = p
                .staking
                .checked_add(p.funded_addresses)
                .map(|t| t.to_string())
                .unwrap_or_else(|| "overflow".to_string());
            return Err(ParamsError::ProportionsExceedOne { total });
        }
        Ok(())
    }

    /// Address strings are checked structurally here; decoding happens when
    /// the funded share is paid out.
    fn validate_funded_addresses(&self) -> Result<(), ParamsError> {
        if self.funded_addresses.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(self.funded_addresses.len());
        let mut total = Ratio::ZERO;

        for (index, entry) in self.funded_addresses.iter().enumerate() {
            if entry.address.trim().is_empty() {
                return Err(ParamsError::EmptyFundedAddress(index));
            }
            if !seen.insert(entry.address.as_str()) {
                return Err(ParamsError::DuplicateFundedAddress(entry.address.clone()));
            }
            if entry.weight.is_zero() || entry.weight > Ratio::ONE {
                return Err(ParamsError::InvalidWeight {
                    address: entry.address.clone(),
                    weight: entry.weight,
                });
            }
            total = total
                .checked_add(entry.weight)
                .ok_or_else(|| ParamsError::WeightsDoNotSumToOne {
                    total: "overflow".to_string(),
                })?;
        }

        if total != Ratio::ONE {
            return Err(ParamsError::WeightsDoNotSumToOne {
                total: total.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> String {
        ippan_types::encode_address(&[n; 32])
    }

    fn valid() -> Params {
        Params::new(
            "uipn",
            DistributionProportions::new(Ratio::from_percent(40), Ratio::from_percent(20)),
            vec![
                WeightedAddress::new(addr(1), Ratio::from_percent(50)),
                WeightedAddress::new(addr(2), Ratio::from_percent(50)),
            ],
        )
    }

    #[test]
    fn accepts_well_formed_params() {
        valid().validate().unwrap();

        let mut no_beneficiaries = valid();
        no_beneficiaries.funded_addresses.clear();
        no_beneficiaries.validate().unwrap();
    }

    #[test]
    fn community_pool_share_is_the_rest() {
        let p = valid().distribution_proportions;
        assert_eq!(p.community_pool(), Some(Ratio::from_percent(40)));
    }

    #[test]
    fn rejects_bad_denom() {
        let mut p = valid();
        p.mint_denom = "x".into();
        assert!(matches!(p.validate(), Err(ParamsError::InvalidDenom(_))));

        assert!(Params::default().validate().is_err());
    }

    #[test]
    fn rejects_proportions_above_one() {
        let mut p = valid();
        p.distribution_proportions.staking = Ratio::from_percent(101);
        assert!(matches!(
            p.validate(),
            Err(ParamsError::ProportionOutOfRange { name: "staking", .. })
        ));

        let mut p = valid();
        p.distribution_proportions = DistributionProportions::new(
            Ratio::from_percent(70),
            Ratio::from_percent(40),
        );
        assert_eq!(
            p.validate(),
            Err(ParamsError::ProportionsExceedOne {
                total: "1.1".into()
            })
        );
    }

    #[test]
    fn rejects_bad_funded_addresses() {
        let mut p = valid();
        p.funded_addresses[1].address = "  ".into();
        assert_eq!(p.validate(), Err(ParamsError::EmptyFundedAddress(1)));

        let mut p = valid();
        p.funded_addresses[1].address = addr(1);
        assert!(matches!(p.validate(), Err(ParamsError::DuplicateFundedAddress(_))));

        let mut p = valid();
        p.funded_addresses[0].weight = Ratio::ZERO;
        p.funded_addresses[1].weight = Ratio::ONE;
        assert!(matches!(p.validate(), Err(ParamsError::InvalidWeight { .. })));

        let mut p = valid();
        p.funded_addresses[1].weight = Ratio::from_percent(30);
        assert_eq!(
            p.validate(),
            Err(ParamsError::WeightsDoNotSumToOne { total: "0.8".into() })
        );
    }

    #[test]
    fn json_shape_is_stable() {
        let json = serde_json::to_value(valid()).unwrap();
        assert_eq!(json["distribution_proportions"]["staking"], "0.4");
        assert_eq!(json["funded_addresses"][0]["weight"], "0.5");
        let back: Params = serde_json::from_value(json).unwrap();
        assert_eq!(back, valid());
    }
}
