use serde::Serialize;

use super::addresses_model::AddressesState;
use crate::utils::format_amount;

/// One rendered row of the address list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRowProps {
    pub address: String,
    pub selected: bool,
    pub loading: bool,
    pub failed: bool,
    /// `"{balance} {symbol}"`, empty until a balance is known.
    pub balance_text: String,
}

/// Display-ready values for the address list renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressesProps {
    pub address_current: String,
    pub symbol: String,
    pub addresses: Vec<AddressRowProps>,
    pub total_text: String,
}

impl AddressesProps {
    pub fn build(state: &AddressesState, symbol: &str, decimals: u32) -> Self {
        let addresses = state
            .rows
            .iter()
            .map(|row| AddressRowProps {
                address: row.address.clone(),
                selected: row.address == state.address_current,
                loading: row.status.is_loading(),
                failed: row.status.is_failed(),
                balance_text: row
                    .balance
                    .map(|b| format_amount(b, symbol, decimals))
                    .unwrap_or_default(),
            })
            .collect();

        AddressesProps {
            address_current: state.address_current.clone(),
            symbol: symbol.to_string(),
            addresses,
            total_text: format_amount(state.total(), symbol, decimals),
        }
    }
}
