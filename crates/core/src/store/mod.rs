//! Observable per-view state store.
//!
//! Each mounted view owns one [`ViewStore`]. Writes go through a
//! [`Collector`] that batches the changed fields and notifies every
//! registered [`StoreObserver`] once per batch. Destroying the store on
//! unmount drops the observers and turns later writes into no-ops.

mod observer;
mod view_field;
mod view_store;

pub use observer::*;
pub use view_field::ViewField;
pub use view_store::{Collector, SubscriptionId, ViewStore};
