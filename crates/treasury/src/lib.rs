//! IPPAN Treasury Module
//!
//! Bank and community-pool sinks that the mint module distributes through,
//! with an in-memory ledger and a recording mock for simulation and tests.

pub mod account_ledger;
pub mod errors;
pub mod mock;

pub use account_ledger::{BankKeeper, CommunityPoolKeeper, InMemoryLedger, LedgerSnapshot};
pub use errors::TransferError;
pub use mock::{FailOn, MockBank, TransferCall};
