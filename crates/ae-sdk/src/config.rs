//! SDK configuration management

use std::path::{Path, PathBuf};

use ae_tx::helpers::MIN_GAS_PRICE;
use ae_tx::{BigUint, BuildOptions, Denomination, DEFAULT_FEE_MAX_ITERATIONS};
use serde::{Deserialize, Serialize};

use crate::SdkError;

/// SDK configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Gas price used for automatic fees, in aettos
    #[serde(default = "default_gas_price")]
    pub gas_price: u64,
    /// Iteration cap of the minimum fee calculation
    #[serde(default = "default_fee_max_iterations")]
    pub fee_max_iterations: usize,
    /// Unit of `amount` fields, e.g. `ae` or `aettos`
    #[serde(default = "default_denomination")]
    pub denomination: String,
    /// `ttl` filled into transactions that leave it out
    #[serde(default)]
    pub default_ttl: u64,
    /// Default tracing filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_gas_price() -> u64 {
    MIN_GAS_PRICE
}

fn default_fee_max_iterations() -> usize {
    DEFAULT_FEE_MAX_ITERATIONS
}

fn default_denomination() -> String {
    Denomination::Aettos.name().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            gas_price: default_gas_price(),
            fee_max_iterations: default_fee_max_iterations(),
            denomination: default_denomination(),
            default_ttl: 0,
            log_level: default_log_level(),
        }
    }
}

impl SdkConfig {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".aeternity"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("sdk.toml"))
    }

    /// Load config from the default path or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Load config from a file
    pub fn load_from(path: &Path) -> Result<Self, SdkError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SdkError> {
        let config: Self = toml::from_str(content)?;
        config.denomination()?;
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<(), SdkError> {
        let path = Self::config_path()
            .ok_or_else(|| SdkError::Config("Cannot determine config path".to_string()))?;
        self.save_to(&path)
    }

    /// Save config to a file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), SdkError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Parsed `denomination`
    pub fn denomination(&self) -> Result<Denomination, SdkError> {
        Ok(self.denomination.parse()?)
    }

    /// Builder options carrying this configuration
    pub fn build_options(&self) -> Result<BuildOptions, SdkError> {
        Ok(BuildOptions {
            denomination: self.denomination()?,
            gas_price: BigUint::from(self.gas_price),
            fee_max_iterations: self.fee_max_iterations,
            ..BuildOptions::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SdkConfig::default();
        assert_eq!(config.gas_price, 1_000_000_000);
        assert_eq!(config.fee_max_iterations, 32);
        assert_eq!(config.denomination, "aettos");
        assert_eq!(config.default_ttl, 0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_partial_toml() {
        let config = SdkConfig::from_toml_str("denomination = \"ae\"\ndefault_ttl = 500").unwrap();
        assert_eq!(config.denomination().unwrap(), Denomination::Ae);
        assert_eq!(config.default_ttl, 500);
        assert_eq!(config.gas_price, 1_000_000_000);
    }

    #[test]
    fn test_config_rejects_unknown_denomination() {
        let err = SdkConfig::from_toml_str("denomination = \"satoshi\"").unwrap_err();
        assert_eq!(err.to_string(), "Invalid denomination: satoshi");
    }

    #[test]
    fn test_build_options() {
        let config = SdkConfig {
            gas_price: 2_000_000_000,
            fee_max_iterations: 5,
            ..SdkConfig::default()
        };
        let opts = config.build_options().unwrap();
        assert_eq!(opts.gas_price, BigUint::from(2_000_000_000u64));
        assert_eq!(opts.fee_max_iterations, 5);
        assert_eq!(opts.denomination, Denomination::Aettos);
        assert_eq!(opts.version, None);
    }
}
