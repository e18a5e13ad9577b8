use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::send_model::SendState;
use crate::constants::FEE_FIAT_DECIMALS;
use crate::utils::format_currency;
use crate::views::FetchStatus;

/// Display-ready values for the send form renderer.
///
/// Every field is a plain value; nothing here refers back to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendProps {
    pub color: String,
    pub address_input: String,
    pub address_input_error: bool,
    /// Crypto amount text.
    pub amount1_input: String,
    /// Fiat amount text.
    pub amount2_input: String,
    pub amount_input_invalid: bool,
    pub symbol_crypto: String,
    pub symbol_currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
    pub fee_fiat: String,
    pub fee_input_invalid: bool,
    pub fee_status: FetchStatus,
    pub password_input: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub balance_status: FetchStatus,
    pub is_enough_balance: bool,
    /// Submit gate: field validity and enough balance.
    pub is_valid_form: bool,
    pub price_available: bool,
    pub price_stale: bool,
}

/// Per-view constants needed to build [`SendProps`].
#[derive(Debug, Clone)]
pub struct SendPropsContext<'a> {
    pub color: &'a str,
    pub symbol: &'a str,
    pub currency: &'a str,
    pub price_max_age: chrono::Duration,
    pub now: DateTime<Utc>,
}

impl SendProps {
    pub fn build(state: &SendState, ctx: &SendPropsContext<'_>) -> Self {
        let converted = state.converted();
        let fee = state.fee_amount();
        let price = state.price_value();

        let fee_fiat = state
            .price
            .and_then(|q| q.convert(fee))
            .map(|value| format_currency(value, ctx.currency, FEE_FIAT_DECIMALS))
            .unwrap_or_default();

        let is_enough_balance = state.is_enough_balance();

        SendProps {
            color: ctx.color.to_string(),
            address_input: state.address_input.clone(),
            address_input_error: state.address_input_error,
            amount1_input: converted.crypto_text,
            amount2_input: converted.fiat_text,
            amount_input_invalid: converted.input_invalid,
            symbol_crypto: ctx.symbol.to_string(),
            symbol_currency: ctx.currency.to_string(),
            fee,
            fee_fiat,
            fee_input_invalid: state.fee.is_input_invalid(),
            fee_status: state.fee.status().clone(),
            password_input: state.password_input.clone(),
            balance: state.balance,
            balance_status: state.balance_status.clone(),
            is_enough_balance,
            is_valid_form: state.is_valid_form() && is_enough_balance,
            price_available: price.is_some(),
            price_stale: state
                .price
                .is_some_and(|q| q.is_stale(ctx.now, ctx.price_max_age)),
        }
    }
}
