//! Provider configuration

use crate::error::{FxError, Result};
use crate::fx::CurrencyUnit;
use serde::Deserialize;
use std::path::Path;

/// Significant digits a `rust_decimal::Decimal` can carry
pub const MAX_SCALE: u32 = 28;

/// Configuration for a historic rate provider
///
/// ```toml
/// name = "ecb"
/// pivot = "EUR"
/// scale = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, recorded on every rate it returns
    pub name: String,
    /// Currency every ingested quote is expressed against
    pub pivot: CurrencyUnit,
    /// Significant digits derived rates are rounded to (full precision if unset)
    #[serde(default)]
    pub scale: Option<u32>,
}

impl ProviderConfig {
    pub fn new(name: &str, pivot: CurrencyUnit) -> Self {
        Self {
            name: name.to_string(),
            pivot,
            scale: None,
        }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FxError::ConfigError("provider name is empty".to_string()));
        }
        if let Some(scale) = self.scale {
            if scale == 0 || scale > MAX_SCALE {
                return Err(FxError::ConfigError(format!(
                    "scale {} outside 1..={}",
                    scale, MAX_SCALE
                )));
            }
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            pivot: CurrencyUnit(String::from("USD")),
            scale: None,
        }
    }
}
