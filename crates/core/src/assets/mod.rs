//! Assets module - wallet asset model, provider contract and registry.

mod asset_registry;
mod assets_model;
mod assets_traits;
mod mock_provider;

pub use asset_registry::AssetRegistry;
pub use assets_model::Asset;
pub use assets_traits::AssetProviderTrait;
pub use mock_provider::MockAssetProvider;
