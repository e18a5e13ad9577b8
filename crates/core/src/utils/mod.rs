pub mod numbers;

pub use numbers::{
    decimals_max, format_amount, format_currency, parse_number, parse_number_or_zero,
};
