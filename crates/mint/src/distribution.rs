//! Minted coin distribution
//!
//! Every block the freshly minted coin is split three ways:
//!
//! 1. `floor(amount * staking)` to the fee collector module account;
//! 2. `floor(amount * funded_addresses)` to the weighted beneficiaries, or
//!    to the community pool when none are configured;
//! 3. whatever was not routed by the first two steps to the community pool.
//!
//! Step 3 subtracts what was actually paid out, so truncation dust from the
//! beneficiary split ends up in the pool and the three destinations always
//! add up to the minted amount.

use crate::errors::{MintError, Result};
use crate::keeper::MintKeeper;
use ippan_storage::KvStore;
use ippan_treasury::{BankKeeper, CommunityPoolKeeper};
use ippan_types::{Address, AddressCodec, Amount, Coin, CoinError, Ratio};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Collaborators a distribution moves balances through.
#[derive(Clone, Copy)]
pub struct DistributionContext<'a> {
    pub bank: &'a dyn BankKeeper,
    pub community_pool: &'a dyn CommunityPoolKeeper,
    pub address_codec: &'a dyn AddressCodec,
}

impl<'a> DistributionContext<'a> {
    pub fn new(
        bank: &'a dyn BankKeeper,
        community_pool: &'a dyn CommunityPoolKeeper,
        address_codec: &'a dyn AddressCodec,
    ) -> Self {
        Self {
            bank,
            community_pool,
            address_codec,
        }
    }
}

/// `floor(coin.amount * ratio)` in the coin's denomination.
pub fn get_proportion(coin: &Coin, ratio: Ratio) -> Coin {
    coin.mul_ratio_truncate(ratio)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundedPayout {
    pub address: Address,
    pub amount: Amount,
}

/// Amounts routed by one distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionOutcome {
    pub denom: String,
    pub staking: Amount,
    pub funded: Vec<FundedPayout>,
    pub community_pool: Amount,
}

impl DistributionOutcome {
    pub fn funded_total(&self) -> Amount {
        self.funded.iter().map(|payout| payout.amount).sum()
    }

    /// Sum over every destination; equals the minted amount.
    pub fn total(&self) -> Amount {
        self.staking + self.funded_total() + self.community_pool
    }
}

impl<S: KvStore> MintKeeper<S> {
    /// Split `minted` between the fee collector, the funded addresses and the
    /// community pool according to the stored params.
    ///
    /// The first failure stops the distribution. Transfers already made are
    /// not undone here; the host discards the block's state on error.
    pub fn distribute_minted_coin(
        &self,
        ctx: &DistributionContext<'_>,
        minted: &Coin,
    ) -> Result<DistributionOutcome> {
        let params = self.get_params()?;
        minted.validate()?;
        if !params.mint_denom.is_empty() && params.mint_denom != minted.denom {
            return Err(CoinError::DenomMismatch {
                expected: params.mint_denom.clone(),
                actual: minted.denom.clone(),
            }
            .into());
        }

        let proportions = &params.distribution_proportions;

        let staking = get_proportion(minted, proportions.staking);
        if !staking.is_zero() {
            ctx.bank
                .send_coins_from_module_to_module(self.module_name(), self.fee_collector(), &staking)?;
            debug!(target: "mint", "sent staking share {} to {}", staking, self.fee_collector());
        }

        let funded_total = get_proportion(minted, proportions.funded_addresses);
        let mut funded = Vec::with_capacity(params.funded_addresses.len());
        let mut routed = Coin::zero(minted.denom.clone());

        if params.funded_addresses.is_empty() {
            // no beneficiaries: the funded share joins the community pool
            if !funded_total.is_zero() {
                ctx.community_pool
                    .fund_community_pool(&funded_total, self.module_address())?;
                debug!(target: "mint", "sent unassigned funded share {} to community pool", funded_total);
            }
            routed = funded_total;
        } else {
            for beneficiary in &params.funded_addresses {
                let share = get_proportion(&funded_total, beneficiary.weight);
                let address = ctx
                    .address_codec
                    .decode(&beneficiary.address)
                    .map_err(|source| {
                        error!(
                            target: "mint",
                            "funded address {:?} does not decode: {}", beneficiary.address, source
                        );
                        MintError::MalformedFundedAddress {
                            address: beneficiary.address.clone(),
                            source,
                        }
                    })?;

                if !share.is_zero() {
                    ctx.bank
                        .send_coins_from_module_to_account(self.module_name(), &address, &share)?;
                    debug!(target: "mint", "sent funded share {} to {}", share, address);
                }
                routed = routed.checked_add(&share)?;
                funded.push(FundedPayout {
                    address,
                    amount: share.amount,
                });
            }
        }

        let remainder = minted
            .checked_sub(&staking)
            .and_then(|rest| rest.checked_sub(&routed))
            .map_err(|err| MintError::InvariantViolation(err.to_string()))?;
        if !remainder.is_zero() {
            ctx.community_pool
                .fund_community_pool(&remainder, self.module_address())?;
            debug!(target: "mint", "sent remainder {} to community pool", remainder);
        }

        let outcome = DistributionOutcome {
            denom: minted.denom.clone(),
            staking: staking.amount,
            funded,
            community_pool: if params.funded_addresses.is_empty() {
                routed.amount + remainder.amount
            } else {
                remainder.amount
            },
        };
        info!(
            target: "mint",
            "distributed {}: staking={} funded={} community_pool={}",
            minted,
            outcome.staking,
            outcome.funded_total(),
            outcome.community_pool
        );
        Ok(outcome)
    }
}
