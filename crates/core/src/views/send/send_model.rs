//! Send form state and its validation rules.

use rust_decimal::Decimal;

use super::amount::{AmountPair, ConvertedAmounts};
use super::fee::FeeState;
use crate::fx::PriceQuote;
use crate::views::FetchStatus;

/// Everything the send form tracks between mount and unmount.
#[derive(Debug, Clone, PartialEq)]
pub struct SendState {
    pub address_input: String,
    pub address_input_error: bool,
    pub amounts: AmountPair,
    pub fee: FeeState,
    pub password_input: String,
    /// Balance of the sending address; the asset's cached value until the
    /// balance fetch completes.
    pub balance: Decimal,
    pub balance_status: FetchStatus,
    /// Bumped on every balance fetch start.
    pub balance_generation: u64,
    pub price: Option<PriceQuote>,
}

impl SendState {
    pub fn new(balance: Decimal, price: Option<PriceQuote>) -> Self {
        Self {
            address_input: String::new(),
            address_input_error: false,
            amounts: AmountPair::new(),
            fee: FeeState::loading(),
            password_input: String::new(),
            balance,
            balance_status: FetchStatus::Loading,
            balance_generation: 0,
            price,
        }
    }

    /// Stores trimmed address text along with the provider's verdict on it.
    pub fn set_address(&mut self, raw: &str, is_valid: bool) {
        self.address_input = raw.trim().to_string();
        self.address_input_error = !is_valid;
    }

    pub fn set_crypto_amount(&mut self, raw: &str) {
        self.amounts.set_crypto(raw);
    }

    pub fn set_fiat_amount(&mut self, raw: &str) {
        self.amounts.set_fiat(raw);
    }

    /// Drives the crypto field with everything spendable after the fee.
    pub fn set_max(&mut self) {
        let max = self.max_amount();
        self.amounts.set_crypto_value(max);
    }

    pub fn set_password(&mut self, raw: &str) {
        self.password_input = raw.trim().to_string();
    }

    /// Marks a new balance fetch as in flight and returns its generation.
    pub fn begin_balance_fetch(&mut self) -> u64 {
        self.balance_generation += 1;
        self.balance_status = FetchStatus::Loading;
        self.balance_generation
    }

    /// Applies the outcome of the balance fetch started as `generation`.
    /// A failure keeps the previous balance. Returns false, leaving the
    /// state untouched, when a newer fetch has started since.
    pub fn complete_balance_fetch(
        &mut self,
        generation: u64,
        outcome: Result<Decimal, String>,
    ) -> bool {
        if generation != self.balance_generation {
            return false;
        }
        match outcome {
            Ok(balance) => {
                self.balance = balance;
                self.balance_status = FetchStatus::Ready;
            }
            Err(reason) => self.balance_status = FetchStatus::failed(reason),
        }
        true
    }

    pub fn price_value(&self) -> Option<Decimal> {
        self.price.and_then(|q| q.usable())
    }

    pub fn converted(&self) -> ConvertedAmounts {
        self.amounts.recompute(self.price_value())
    }

    /// Crypto amount being sent, zero when unparsable or underivable.
    pub fn amount(&self) -> Decimal {
        self.converted().crypto_or_zero()
    }

    pub fn fee_amount(&self) -> Decimal {
        self.fee.current()
    }

    /// `balance - fee`, clamped at zero.
    pub fn max_amount(&self) -> Decimal {
        self.balance
            .checked_sub(self.fee_amount())
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }

    pub fn is_enough_balance(&self) -> bool {
        self.amount() <= self.max_amount()
    }

    /// Field-level validity, not including the balance check.
    pub fn is_valid_form(&self) -> bool {
        !self.address_input_error
            && !self.address_input.is_empty()
            && !self.password_input.is_empty()
            && self.amount() > Decimal::ZERO
            && self.fee_amount() > Decimal::ZERO
    }

    /// Final submit gate.
    pub fn can_submit(&self) -> bool {
        self.is_valid_form() && self.is_enough_balance()
    }
}
