use std::collections::HashMap;

use rust_decimal::Decimal;

use super::fx_model::PriceQuote;

/// Latest quotes per asset symbol, all in one fiat currency.
#[derive(Debug, Clone)]
pub struct PriceBook {
    currency: String,
    quotes: HashMap<String, PriceQuote>,
}

impl PriceBook {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            quotes: HashMap::new(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Records `quote` for `symbol`. Older quotes never replace newer ones.
    pub fn update(&mut self, symbol: &str, quote: PriceQuote) {
        let key = symbol.to_ascii_uppercase();
        match self.quotes.get(&key) {
            Some(existing) if existing.updated_at > quote.updated_at => {
                log::debug!(
                    "Ignoring out-of-order {} quote from {}",
                    key,
                    quote.updated_at
                );
            }
            _ => {
                self.quotes.insert(key, quote);
            }
        }
    }

    pub fn quote(&self, symbol: &str) -> Option<PriceQuote> {
        self.quotes.get(&symbol.to_ascii_uppercase()).copied()
    }

    /// Price usable for conversion, `None` when missing or zero.
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.quote(symbol).and_then(|q| q.usable())
    }

    /// Converts `amount` of `symbol` into the book's fiat currency. `None`
    /// when there is no usable price or the value overflows.
    pub fn convert_balance(&self, symbol: &str, amount: Decimal) -> Option<Decimal> {
        self.quote(symbol).and_then(|q| q.convert(amount))
    }
}
