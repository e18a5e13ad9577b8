use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BALANCE_DISPLAY_DECIMALS, DEFAULT_CURRENCY, DEFAULT_PRICE_MAX_AGE_SECS,
    MAX_DECIMAL_SCALE,
};
use crate::errors::{Result, ValidationError};

/// Settings that shape how the wallet views present amounts.
///
/// Missing keys fall back to their defaults, so a partial JSON document
/// such as `{"currency": "EUR"}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletSettings {
    /// Fiat currency the prices are quoted in.
    pub currency: String,
    /// Age in seconds after which a price quote is reported as stale.
    pub price_max_age_secs: u64,
    /// Decimal places shown for balances in the address list.
    pub balance_display_decimals: u32,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            price_max_age_secs: DEFAULT_PRICE_MAX_AGE_SECS,
            balance_display_decimals: DEFAULT_BALANCE_DISPLAY_DECIMALS,
        }
    }
}

impl WalletSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: WalletSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingField("currency".to_string()).into());
        }
        if self.balance_display_decimals > MAX_DECIMAL_SCALE {
            return Err(ValidationError::InvalidInput(format!(
                "balanceDisplayDecimals must be at most {}, got {}",
                MAX_DECIMAL_SCALE, self.balance_display_decimals
            ))
            .into());
        }
        Ok(())
    }

    pub fn price_max_age(&self) -> chrono::Duration {
        // chrono panics past i64::MAX milliseconds
        let secs = self.price_max_age_secs.min(i64::MAX as u64 / 1_000) as i64;
        chrono::Duration::seconds(secs)
    }
}
