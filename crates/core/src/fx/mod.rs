//! FX module - live crypto prices quoted in the wallet's fiat currency.

mod fx_model;
mod price_book;

pub use fx_model::PriceQuote;
pub use price_book::PriceBook;
