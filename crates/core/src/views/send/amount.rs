//! Crypto/fiat amount pair kept consistent under a single live price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{CRYPTO_DECIMALS, FIAT_DECIMALS};
use crate::utils::{decimals_max, parse_number, parse_number_or_zero};

/// Which of the two linked inputs the user typed into last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingField {
    Crypto,
    Fiat,
}

/// Two-field amount entry. Only the driving side is stored; the other is
/// derived from it on every [`AmountPair::recompute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountPair {
    driving: DrivingField,
    input: String,
}

impl Default for AmountPair {
    fn default() -> Self {
        Self {
            driving: DrivingField::Crypto,
            input: "0".to_string(),
        }
    }
}

impl AmountPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driving(&self) -> DrivingField {
        self.driving
    }

    /// Raw text of the driving field, exactly as typed.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_crypto(&mut self, raw: impl Into<String>) {
        self.driving = DrivingField::Crypto;
        self.input = raw.into();
    }

    pub fn set_fiat(&mut self, raw: impl Into<String>) {
        self.driving = DrivingField::Fiat;
        self.input = raw.into();
    }

    /// Drives the crypto side with an exact value (used by "Max").
    pub fn set_crypto_value(&mut self, value: Decimal) {
        self.set_crypto(value.normalize().to_string());
    }

    /// True when the typed text is non-empty but not a number.
    pub fn is_input_invalid(&self) -> bool {
        !self.input.trim().is_empty() && parse_number(&self.input).is_none()
    }

    /// Derives the non-driving side from the driving one at `price`.
    ///
    /// Without a positive price the derived side is `None`. Arithmetic that
    /// would overflow is treated the same way.
    pub fn recompute(&self, price: Option<Decimal>) -> ConvertedAmounts {
        let price = price.filter(|p| *p > Decimal::ZERO);
        let typed = parse_number_or_zero(&self.input);

        let (crypto, fiat) = match self.driving {
            DrivingField::Crypto => {
                let fiat = price
                    .and_then(|p| p.checked_mul(typed))
                    .map(|v| decimals_max(v, FIAT_DECIMALS));
                (Some(typed), fiat)
            }
            DrivingField::Fiat => {
                let crypto = price
                    .and_then(|p| typed.checked_div(p))
                    .map(|v| decimals_max(v, CRYPTO_DECIMALS));
                (crypto, Some(typed))
            }
        };

        let (crypto_text, fiat_text) = match self.driving {
            DrivingField::Crypto => (self.input.clone(), display(fiat)),
            DrivingField::Fiat => (display(crypto), self.input.clone()),
        };

        ConvertedAmounts {
            driving: self.driving,
            crypto,
            fiat,
            crypto_text,
            fiat_text,
            input_invalid: self.is_input_invalid(),
        }
    }
}

fn display(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Result of [`AmountPair::recompute`]: numeric values for computation and
/// display text for both inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedAmounts {
    pub driving: DrivingField,
    pub crypto: Option<Decimal>,
    pub fiat: Option<Decimal>,
    pub crypto_text: String,
    pub fiat_text: String,
    pub input_invalid: bool,
}

impl ConvertedAmounts {
    /// Crypto amount used for validation; zero when it could not be derived.
    pub fn crypto_or_zero(&self) -> Decimal {
        self.crypto.unwrap_or(Decimal::ZERO)
    }
}
