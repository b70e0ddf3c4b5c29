/// Module name; also the default store namespace and module account name.
pub const MODULE_NAME: &str = "mint";

/// Default store namespace for mint records.
pub const STORE_KEY: &str = MODULE_NAME;

/// Module account that forwards staking rewards to the staking module.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// Module account allowed to update params by default.
pub const GOV_MODULE_NAME: &str = "gov";

pub const MINTER_KEY: &[u8] = &[0x00];
pub const PARAMS_KEY: &[u8] = &[0x01];
