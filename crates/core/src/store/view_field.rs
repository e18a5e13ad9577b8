//! Observable field identifiers.

use serde::{Deserialize, Serialize};

/// Names a field of view state whose change observers are told about.
///
/// One enum covers both wallet screens, so a renderer can route
/// notifications without knowing which view produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewField {
    /// Destination address text and its validity flag.
    AddressInput,
    /// Crypto/fiat amount pair, including which side is driving.
    Amount,
    /// Recommended fee, user override and fetch status.
    Fee,
    PasswordInput,
    /// Balance of the sending address and its fetch status.
    Balance,
    /// Live price used for crypto/fiat conversion.
    Price,
    /// Address list rows (balances, loading flags).
    Addresses,
    /// Currently selected address in the address list.
    AddressCurrent,
}

impl ViewField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewField::AddressInput => "address_input",
            ViewField::Amount => "amount",
            ViewField::Fee => "fee",
            ViewField::PasswordInput => "password_input",
            ViewField::Balance => "balance",
            ViewField::Price => "price",
            ViewField::Addresses => "addresses",
            ViewField::AddressCurrent => "address_current",
        }
    }
}
