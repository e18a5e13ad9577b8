use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price of one unit of an asset in the wallet's fiat currency.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(value: Decimal, updated_at: DateTime<Utc>) -> Self {
        Self { value, updated_at }
    }

    /// A quote stamped with the current time.
    pub fn now(value: Decimal) -> Self {
        Self::new(value, Utc::now())
    }

    /// The price, or `None` when it cannot be divided by.
    pub fn usable(&self) -> Option<Decimal> {
        if self.value.is_zero() || self.value.is_sign_negative() {
            None
        } else {
            Some(self.value)
        }
    }

    /// Values `amount` at this quote. `None` when the price is unusable or
    /// the product overflows.
    pub fn convert(&self, amount: Decimal) -> Option<Decimal> {
        self.usable().and_then(|price| price.checked_mul(amount))
    }

    pub fn is_stale(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        now.signed_duration_since(self.updated_at) > max_age
    }
}
