//! Walletview Core - View models for a multi-asset crypto wallet.
//!
//! This crate holds the state and rules behind the wallet's send form and
//! address list. It is renderer-agnostic: views expose flat props and change
//! notifications, and talk to chains through the `AssetProviderTrait` seam.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod settings;
pub mod store;
pub mod utils;
pub mod views;

// Re-export the types a host needs to mount views
pub use assets::{Asset, AssetProviderTrait, AssetRegistry};
pub use fx::{PriceBook, PriceQuote};
pub use settings::WalletSettings;
pub use views::{AddressesView, SendView};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
