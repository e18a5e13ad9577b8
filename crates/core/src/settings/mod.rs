//! Wallet-level settings shared by every view.

mod settings_model;

pub use settings_model::WalletSettings;
