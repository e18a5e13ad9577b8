//! Asset domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wallet asset: one symbol, one or more owned addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    /// Address currently selected for sending and display.
    pub address: String,
    /// Every address owned by the wallet for this asset.
    pub addresses: Vec<String>,
    /// Last known balance of `address`.
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

impl Asset {
    /// Creates an asset whose only address is `address`.
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            id: id.into(),
            symbol: symbol.into(),
            addresses: vec![address.clone()],
            address,
            balance: Decimal::ZERO,
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// Adds `address` to the owned addresses, ignoring duplicates.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        if !self.addresses.contains(&address) {
            self.addresses.push(address);
        }
        self
    }

    pub fn owns(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a == address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_asset_owns_its_address() {
        let asset = Asset::new("btc-1", "BTC", "1abc");
        assert_eq!(asset.address, "1abc");
        assert_eq!(asset.addresses, vec!["1abc".to_string()]);
        assert!(asset.owns("1abc"));
        assert!(!asset.owns("1xyz"));
        assert_eq!(asset.balance, Decimal::ZERO);
    }

    #[test]
    fn test_with_address_skips_duplicates() {
        let asset = Asset::new("btc-1", "BTC", "1abc")
            .with_address("1def")
            .with_address("1abc");
        assert_eq!(asset.addresses.len(), 2);
    }

    #[test]
    fn test_balance_serializes_as_string() {
        let asset = Asset::new("eth-1", "ETH", "0xabc").with_balance(dec!(1.25));
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["balance"], "1.25");
        assert_eq!(json["symbol"], "ETH");
    }
}
