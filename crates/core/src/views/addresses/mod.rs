//! Address list: every owned address of one asset with its balance.

mod addresses_model;
mod addresses_props;
mod addresses_view;


pub use addresses_model::{AddressRow, AddressesState};
pub use addresses_props::{AddressRowProps, AddressesProps};
pub use addresses_view::AddressesView;
