use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;

/// Per-symbol asset backend (BTC, ETH, ...).
///
/// Fetches are awaited on spawned tasks owned by a view, so implementations
/// must not assume they are polled to completion: a view that unmounts
/// aborts them.
#[async_trait]
pub trait AssetProviderTrait: Send + Sync {
    /// Ticker symbol this provider serves, e.g. "BTC".
    fn symbol(&self) -> &str;

    /// Display color for the asset, as a CSS color string.
    fn color(&self) -> &str;

    /// Returns true when `address` is well formed for this asset.
    fn is_address_check(&self, address: &str) -> bool;

    /// Fetches the network fee currently recommended for sending from `address`.
    async fn fetch_recommended_fee(&self, address: &str) -> Result<Decimal>;

    /// Fetches the confirmed balance of `address`.
    async fn fetch_balance(&self, address: &str) -> Result<Decimal>;
}
