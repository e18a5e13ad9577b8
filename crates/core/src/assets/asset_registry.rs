use std::collections::HashMap;
use std::sync::Arc;

use super::assets_traits::AssetProviderTrait;
use crate::errors::{Error, Result};

/// Lookup table from asset symbol to its provider.
#[derive(Clone, Default)]
pub struct AssetRegistry {
    providers: HashMap<String, Arc<dyn AssetProviderTrait>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under its own symbol, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn AssetProviderTrait>) {
        let symbol = provider.symbol().to_ascii_uppercase();
        if self.providers.insert(symbol.clone(), provider).is_some() {
            log::debug!("Replaced asset provider for {}", symbol);
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn AssetProviderTrait>) -> Self {
        self.register(provider);
        self
    }

    /// Returns the provider for `symbol` (case-insensitive).
    pub fn get(&self, symbol: &str) -> Result<Arc<dyn AssetProviderTrait>> {
        self.providers
            .get(&symbol.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| Error::UnsupportedAsset(symbol.to_string()))
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.providers.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}
