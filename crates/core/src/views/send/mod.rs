//! Send-funds form: amount conversion, fee handling and submit validation.

pub mod amount;
mod fee;
mod send_model;
mod send_props;
mod send_view;

#[cfg(test)]
mod send_view_tests;

pub use amount::{AmountPair, ConvertedAmounts, DrivingField};
pub use fee::FeeState;
pub use send_model::SendState;
pub use send_props::{SendProps, SendPropsContext};
pub use send_view::SendView;
