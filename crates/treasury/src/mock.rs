//! Recording bank for deterministic testing and simulation.
//!
//! Wraps an [`InMemoryLedger`], keeps every successful call in order and can
//! be told to reject a specific kind of transfer.

use crate::account_ledger::{BankKeeper, CommunityPoolKeeper, InMemoryLedger};
use crate::errors::TransferError;
use ippan_types::{Address, Coin};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferCall {
    Mint {
        module: String,
        coin: Coin,
    },
    ModuleToModule {
        from: String,
        to: String,
        coin: Coin,
    },
    ModuleToAccount {
        from: String,
        to: Address,
        coin: Coin,
    },
    CommunityPool {
        depositor: Address,
        coin: Coin,
    },
}

impl TransferCall {
    pub fn coin(&self) -> &Coin {
        match self {
            TransferCall::Mint { coin, .. }
            | TransferCall::ModuleToModule { coin, .. }
            | TransferCall::ModuleToAccount { coin, .. }
            | TransferCall::CommunityPool { coin, .. } => coin,
        }
    }
}

/// Which calls the mock should reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    ModuleRecipient(String),
    AccountRecipient(Address),
    CommunityPool,
}

#[derive(Debug, Default)]
pub struct MockBank {
    ledger: InMemoryLedger,
    calls: Mutex<Vec<TransferCall>>,
    rejected: Mutex<Vec<TransferCall>>,
    fail_on: Mutex<Option<FailOn>>,
}

impl MockBank {
    pub fn with_modules(names: &[&str]) -> Self {
        Self {
            ledger: InMemoryLedger::with_modules(names),
            ..Default::default()
        }
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    pub fn fail_on(&self, rule: FailOn) {
        *self.fail_on.lock() = Some(rule);
    }

    pub fn clear_failure(&self) {
        *self.fail_on.lock() = None;
    }

    /// Successful calls, in the order they were made.
    pub fn calls(&self) -> Vec<TransferCall> {
        self.calls.lock().clone()
    }

    /// Calls refused by the configured [`FailOn`] rule.
    pub fn rejected_calls(&self) -> Vec<TransferCall> {
        self.rejected.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
        self.rejected.lock().clear();
    }

    fn should_fail(&self, call: &TransferCall) -> bool {
        match (self.fail_on.lock().as_ref(), call) {
            (Some(FailOn::ModuleRecipient(name)), TransferCall::ModuleToModule { to, .. }) => {
                name == to
            }
            (Some(FailOn::AccountRecipient(addr)), TransferCall::ModuleToAccount { to, .. }) => {
                addr == to
            }
            (Some(FailOn::CommunityPool), TransferCall::CommunityPool { .. }) => true,
            _ => false,
        }
    }

    fn record(
        &self,
        call: TransferCall,
        apply: impl FnOnce() -> Result<(), TransferError>,
    ) -> Result<(), TransferError> {
        if self.should_fail(&call) {
            let reason = format!("mock rejected {call:?}");
            self.rejected.lock().push(call);
            return Err(TransferError::Rejected(reason));
        }
        apply()?;
        self.calls.lock().push(call);
        Ok(())
    }
}

impl BankKeeper for MockBank {
    fn mint_coins(&self, module: &str, coin: &Coin) -> Result<(), TransferError> {
        let call = TransferCall::Mint {
            module: module.to_string(),
            coin: coin.clone(),
        };
        self.record(call, || self.ledger.mint_coins(module, coin))
    }

    fn send_coins_from_module_to_module(
        &self,
        sender_module: &str,
        recipient_module: &str,
        coin: &Coin,
    ) -> Result<(), TransferError> {
        let call = TransferCall::ModuleToModule {
            from: sender_module.to_string(),
            to: recipient_module.to_string(),
            coin: coin.clone(),
        };
        self.record(call, || {
            self.ledger
                .send_coins_from_module_to_module(sender_module, recipient_module, coin)
        })
    }

    fn send_coins_from_module_to_account(
        &self,
        sender_module: &str,
        recipient: &Address,
        coin: &Coin,
    ) -> Result<(), TransferError> {
        let call = TransferCall::ModuleToAccount {
            from: sender_module.to_string(),
            to: *recipient,
            coin: coin.clone(),
        };
        self.record(call, || {
            self.ledger
                .send_coins_from_module_to_account(sender_module, recipient, coin)
        })
    }
}

impl CommunityPoolKeeper for MockBank {
    fn fund_community_pool(&self, coin: &Coin, depositor: &Address) -> Result<(), TransferError> {
        let call = TransferCall::CommunityPool {
            depositor: *depositor,
            coin: coin.clone(),
        };
        self.record(call, || self.ledger.fund_community_pool(coin, depositor))
    }
}
