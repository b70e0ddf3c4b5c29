//! Bank and community-pool interfaces used by the mint module
//!
//! Provides the sink traits the distribution engine transfers through, plus a
//! deterministic in-memory ledger implementing both of them for node runtime
//! simulation and testing.

use crate::errors::TransferError;
use ippan_types::{Address, Amount, Coin};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Moves coins between module accounts and user accounts.
pub trait BankKeeper {
    /// Create new supply and credit it to a module account.
    fn mint_coins(&self, module: &str, coin: &Coin) -> Result<(), TransferError>;

    /// Move coins from one module account to another.
    fn send_coins_from_module_to_module(
        &self,
        sender_module: &str,
        recipient_module: &str,
        coin: &Coin,
    ) -> Result<(), TransferError>;

    /// Move coins from a module account to a user account.
    fn send_coins_from_module_to_account(
        &self,
        sender_module: &str,
        recipient: &Address,
        coin: &Coin,
    ) -> Result<(), TransferError>;
}

/// Funds the chain's community pool from an account balance.
pub trait CommunityPoolKeeper {
    fn fund_community_pool(&self, coin: &Coin, depositor: &Address) -> Result<(), TransferError>;
}

/// Full ledger state. Cloning it is how tests model a host rollback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    modules: BTreeMap<String, Address>,
    balances: HashMap<Address, BTreeMap<String, Amount>>,
    community_pool: BTreeMap<String, Amount>,
    supply: BTreeMap<String, Amount>,
}

impl LedgerSnapshot {
    fn module_address(&self, name: &str) -> Result<Address, TransferError> {
        self.modules
            .get(name)
            .copied()
            .ok_or_else(|| TransferError::UnknownModule(name.to_string()))
    }

    fn balance(&self, address: &Address, denom: &str) -> Amount {
        self.balances
            .get(address)
            .and_then(|b| b.get(denom))
            .copied()
            .unwrap_or(0)
    }

    fn credit(&mut self, address: &Address, coin: &Coin) -> Result<(), TransferError> {
        let entry = self
            .balances
            .entry(*address)
            .or_default()
            .entry(coin.denom.clone())
            .or_insert(0);
        *entry = entry
            .checked_add(coin.amount)
            .ok_or_else(|| TransferError::Overflow(address.to_string()))?;
        Ok(())
    }

    fn debit(&mut self, address: &Address, coin: &Coin) -> Result<(), TransferError> {
        let available = self.balance(address, &coin.denom);
        if available < coin.amount {
            return Err(TransferError::InsufficientFunds {
                address: *address,
                denom: coin.denom.clone(),
                available,
                requested: coin.amount,
            });
        }
        if let Some(entry) = self
            .balances
            .get_mut(address)
            .and_then(|b| b.get_mut(&coin.denom))
        {
            *entry -= coin.amount;
        }
        Ok(())
    }

    /// Debit then credit; nothing changes when the debit fails.
    fn transfer(&mut self, from: &Address, to: &Address, coin: &Coin) -> Result<(), TransferError> {
        coin.validate()?;
        self.debit(from, coin)?;
        if let Err(err) = self.credit(to, coin) {
            // undo the debit so a failed credit leaves balances untouched
            self.credit(from, coin)?;
            return Err(err);
        }
        Ok(())
    }
}

/// In-memory bank + community pool.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerSnapshot>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with the given module accounts registered.
    pub fn with_modules(names: &[&str]) -> Self {
        let ledger = Self::new();
        for name in names {
            ledger.register_module(name);
        }
        ledger
    }

    /// Register a module account; its address is derived from the name.
    pub fn register_module(&self, name: &str) -> Address {
        let address = Address::for_module(name);
        self.state.write().modules.insert(name.to_string(), address);
        address
    }

    pub fn balance(&self, address: &Address, denom: &str) -> Amount {
        self.state.read().balance(address, denom)
    }

    pub fn module_balance(&self, module: &str, denom: &str) -> Amount {
        self.balance(&Address::for_module(module), denom)
    }

    pub fn community_pool_balance(&self, denom: &str) -> Amount {
        self.state
            .read()
            .community_pool
            .get(denom)
            .copied()
            .unwrap_or(0)
    }

    /// Total minted supply of a denomination.
    pub fn total_supply(&self, denom: &str) -> Amount {
        self.state.read().supply.get(denom).copied().unwrap_or(0)
    }

    /// Credit an account directly (genesis balances, test setup).
    pub fn set_balance(&self, address: &Address, coin: &Coin) {
        self.state
            .write()
            .balances
            .entry(*address)
            .or_default()
            .insert(coin.denom.clone(), coin.amount);
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.read().clone()
    }

    pub fn restore(&self, snapshot: LedgerSnapshot) {
        *self.state.write() = snapshot;
    }
}

impl BankKeeper for InMemoryLedger {
    fn mint_coins(&self, module: &str, coin: &Coin) -> Result<(), TransferError> {
        coin.validate()?;
        let mut state = self.state.write();
        let address = state.module_address(module)?;
        let supply = state.supply.get(&coin.denom).copied().unwrap_or(0);
        let supply = supply
            .checked_add(coin.amount)
            .ok_or_else(|| TransferError::Overflow(coin.denom.clone()))?;
        state.credit(&address, coin)?;
        state.supply.insert(coin.denom.clone(), supply);
        debug!(target: "treasury", "minted {} to module {}", coin, module);
        Ok(())
    }

    fn send_coins_from_module_to_module(
        &self,
        sender_module: &str,
        recipient_module: &str,
        coin: &Coin,
    ) -> Result<(), TransferError> {
        let mut state = self.state.write();
        let from = state.module_address(sender_module)?;
        let to = state.module_address(recipient_module)?;
        state.transfer(&from, &to, coin)?;
        debug!(
            target: "treasury",
            "sent {} from module {} to module {}",
            coin, sender_module, recipient_module
        );
        Ok(())
    }

    fn send_coins_from_module_to_account(
        &self,
        sender_module: &str,
        recipient: &Address,
        coin: &Coin,
    ) -> Result<(), TransferError> {
        let mut state = self.state.write();
        let from = state.module_address(sender_module)?;
        state.transfer(&from, recipient, coin)?;
        debug!(
            target: "treasury",
            "sent {} from module {} to account {}",
            coin, sender_module, recipient
        );
        Ok(())
    }
}

impl CommunityPoolKeeper for InMemoryLedger {
    fn fund_community_pool(&self, coin: &Coin, depositor: &Address) -> Result<(), TransferError> {
        coin.validate()?;
        let mut state = self.state.write();
        let pooled = state.community_pool.get(&coin.denom).copied().unwrap_or(0);
        let pooled = pooled
            .checked_add(coin.amount)
            .ok_or_else(|| TransferError::Overflow("community pool".to_string()))?;
        state.debit(depositor, coin)?;
        state.community_pool.insert(coin.denom.clone(), pooled);
        debug!(target: "treasury", "funded community pool with {} from {}", coin, depositor);
        Ok(())
    }
}
