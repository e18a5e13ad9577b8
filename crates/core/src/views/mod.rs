//! View models for the wallet screens.
//!
//! A view is mounted with its asset and provider, owns a [`ViewStore`] for
//! its state, and exposes flat props for a renderer. Async fetches run on
//! tasks bound to the view's [`ViewLifetime`].
//!
//! [`ViewStore`]: crate::store::ViewStore

pub mod addresses;
mod fetch_status;
pub mod lifetime;
pub mod send;

pub use addresses::{AddressRowProps, AddressesProps, AddressesView};
pub use fetch_status::FetchStatus;
pub use lifetime::{MountGuard, ViewLifetime};
pub use send::{DrivingField, SendProps, SendView};
