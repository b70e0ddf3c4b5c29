//! Mint keeper: persisted minter state and parameters
//!
//! Both records live under the module's own keyspace in the host store.
//! The keeper never commits or rolls back; the host owns the transaction
//! around every call.

use crate::config::MintConfig;
use crate::errors::{MintError, Result};
use crate::keys::{MINTER_KEY, PARAMS_KEY};
use crate::minter::Minter;
use crate::params::Params;
use ippan_storage::{KvStore, KvStoreExt, PrefixStore};
use ippan_treasury::BankKeeper;
use ippan_types::{Address, Coin};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub struct MintKeeper<S> {
    store: PrefixStore<S>,
    config: MintConfig,
    module_address: Address,
}

impl<S: KvStore> MintKeeper<S> {
    pub fn new(store: S, config: MintConfig) -> Self {
        let module_address = Address::for_module(&config.module_name);
        Self {
            store: PrefixStore::new(store, &config.store_prefix),
            config,
            module_address,
        }
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// Address allowed to execute [`MintKeeper::update_params`].
    pub fn authority(&self) -> &str {
        &self.config.authority
    }

    pub fn module_name(&self) -> &str {
        &self.config.module_name
    }

    pub fn module_address(&self) -> &Address {
        &self.module_address
    }

    pub fn fee_collector(&self) -> &str {
        &self.config.fee_collector_name
    }

    /// Write both records at module initialization.
    pub fn initialize(&self, minter: &Minter, params: &Params) -> Result<()> {
        self.set_params(params)?;
        self.set_minter(minter)?;
        info!(target: "mint", "initialized mint module with denom {}", params.mint_denom);
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &[u8], record: &'static str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| MintError::CorruptedRecord { record, source }),
            None => Ok(None),
        }
    }

    /// Minter record, if one has been written.
    pub fn try_get_minter(&self) -> Result<Option<Minter>> {
        self.load(MINTER_KEY, "minter")
    }

    /// Current minter.
    ///
    /// # Panics
    ///
    /// Initialization always writes a minter, so a missing or unreadable
    /// record is a state integrity violation.
    pub fn get_minter(&self) -> Minter {
        match self.try_get_minter() {
            Ok(Some(minter)) => minter,
            Ok(None) => panic!("stored minter should not have been nil"),
            Err(err) => panic!("failed to load stored minter: {err}"),
        }
    }

    pub fn set_minter(&self, minter: &Minter) -> Result<()> {
        self.store.set_json(MINTER_KEY, minter)?;
        debug!(target: "mint", "stored minter inflation={}", minter.inflation);
        Ok(())
    }

    /// Validate and persist. A rejected candidate leaves the stored params untouched.
    pub fn set_params(&self, params: &Params) -> Result<()> {
        if let Err(err) = params.validate() {
            warn!(target: "mint", "rejected mint params: {}", err);
            return Err(err.into());
        }
        self.store.set_json(PARAMS_KEY, params)?;
        debug!(
            target: "mint",
            "stored mint params: staking={} funded={} beneficiaries={}",
            params.distribution_proportions.staking,
            params.distribution_proportions.funded_addresses,
            params.funded_addresses.len()
        );
        Ok(())
    }

    /// Stored params, or the zero value when none were ever set.
    pub fn get_params(&self) -> Result<Params> {
        Ok(self.load(PARAMS_KEY, "params")?.unwrap_or_default())
    }

    /// Governance entry point: only the configured authority may replace params.
    pub fn update_params(&self, sender: &str, params: &Params) -> Result<()> {
        if sender != self.config.authority {
            return Err(MintError::Unauthorized {
                expected: self.config.authority.clone(),
                actual: sender.to_string(),
            });
        }
        self.set_params(params)?;
        info!(target: "mint", "params updated by authority {}", sender);
        Ok(())
    }

    /// Credit freshly minted coin to the module account ahead of distribution.
    pub fn mint_coin(&self, bank: &dyn BankKeeper, coin: &Coin) -> Result<()> {
        coin.validate()?;
        if coin.is_zero() {
            return Ok(());
        }
        bank.mint_coins(self.module_name(), coin)?;
        debug!(target: "mint", "minted {}", coin);
        Ok(())
    }
}
