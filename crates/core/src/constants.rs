/// Decimal places kept when deriving a fiat amount from a crypto amount
pub const FIAT_DECIMALS: u32 = 2;

/// Decimal places kept when deriving a crypto amount from a fiat amount
pub const CRYPTO_DECIMALS: u32 = 10;

/// Decimal places used for the fiat value of the network fee
pub const FEE_FIAT_DECIMALS: u32 = 2;

/// Largest scale `rust_decimal` can represent
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Default fiat currency for a fresh wallet
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default age after which a price quote is flagged as stale
pub const DEFAULT_PRICE_MAX_AGE_SECS: u64 = 300;

/// Default precision when listing address balances
pub const DEFAULT_BALANCE_DISPLAY_DECIMALS: u32 = 8;
