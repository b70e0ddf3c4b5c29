//! Mint module wiring configuration
//!
//! ```toml
//! module_name = "mint"
//! fee_collector_name = "fee_collector"
//! authority = "i6c6f..."
//! store_prefix = "mint"
//! ```

use crate::keys::{FEE_COLLECTOR_NAME, GOV_MODULE_NAME, MODULE_NAME, STORE_KEY};
use ippan_types::{is_valid_address, Address};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse mint config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid mint config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintConfig {
    /// Module account that receives minted coin and pays it out.
    pub module_name: String,
    /// Module account that receives the staking share.
    pub fee_collector_name: String,
    /// Address allowed to replace params.
    pub authority: String,
    /// Namespace of the mint records in the shared store.
    pub store_prefix: String,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            module_name: MODULE_NAME.to_string(),
            fee_collector_name: FEE_COLLECTOR_NAME.to_string(),
            authority: Address::for_module(GOV_MODULE_NAME).to_string(),
            store_prefix: STORE_KEY.to_string(),
        }
    }
}

impl MintConfig {
    /// Parse and validate; omitted fields fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: MintConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module_name.trim().is_empty() {
            return Err(ConfigError::Invalid("module_name is empty".into()));
        }
        if self.fee_collector_name.trim().is_empty() {
            return Err(ConfigError::Invalid("fee_collector_name is empty".into()));
        }
        if self.module_name == self.fee_collector_name {
            return Err(ConfigError::Invalid(
                "module_name and fee_collector_name must differ".into(),
            ));
        }
        if self.store_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("store_prefix is empty".into()));
        }
        if !is_valid_address(&self.authority) {
            return Err(ConfigError::Invalid(format!(
                "authority {:?} is not a valid address",
                self.authority
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MintConfig::default();
        config.validate().unwrap();
        assert_eq!(config.module_name, "mint");
        assert_eq!(config.authority, Address::for_module("gov").to_string());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = MintConfig::from_toml_str("fee_collector_name = \"distribution\"\n").unwrap();
        assert_eq!(config.fee_collector_name, "distribution");
        assert_eq!(config.module_name, "mint");
    }

    #[test]
    fn rejects_invalid_values() {
        let err = MintConfig::from_toml_str("authority = \"nobody\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = MintConfig::from_toml_str("fee_collector_name = \"mint\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = MintConfig::from_toml_str("module_name = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
