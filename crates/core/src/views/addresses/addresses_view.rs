use std::sync::Arc;

use log::{debug, info, warn};

use super::addresses_model::AddressesState;
use super::addresses_props::AddressesProps;
use crate::assets::{Asset, AssetProviderTrait};
use crate::errors::{Error, Result};
use crate::settings::WalletSettings;
use crate::store::{StoreObserver, SubscriptionId, ViewField, ViewStore};
use crate::views::ViewLifetime;

/// View model behind the address list of one asset.
///
/// Mounting fetches the balance of every owned address concurrently; each
/// completion updates its own row and notifies once.
pub struct AddressesView {
    asset: Asset,
    provider: Arc<dyn AssetProviderTrait>,
    settings: WalletSettings,
    store: Arc<ViewStore<AddressesState>>,
    lifetime: ViewLifetime,
}

impl AddressesView {
    /// Mounts the list for `asset`. Must be called inside a tokio runtime.
    pub fn mount(
        asset: Asset,
        provider: Arc<dyn AssetProviderTrait>,
        settings: WalletSettings,
    ) -> Result<Self> {
        settings.validate()?;
        if !provider.symbol().eq_ignore_ascii_case(&asset.symbol) {
            return Err(Error::UnsupportedAsset(format!(
                "{} (provider serves {})",
                asset.symbol,
                provider.symbol()
            )));
        }

        let state = AddressesState::new(asset.address.clone(), &asset.addresses);
        let view = AddressesView {
            asset,
            provider,
            settings,
            store: Arc::new(ViewStore::new(state)),
            lifetime: ViewLifetime::new(),
        };

        view.fetch_balances()?;
        info!(
            "Mounted address list for {} with {} address(es)",
            view.asset.symbol,
            view.asset.addresses.len()
        );
        Ok(view)
    }

    pub fn is_mounted(&self) -> bool {
        self.lifetime.is_open()
    }

    pub fn observe(&self, observer: Arc<dyn StoreObserver>) -> SubscriptionId {
        self.store.observe(observer)
    }

    pub fn unobserve(&self, id: SubscriptionId) -> bool {
        self.store.unobserve(id)
    }

    pub fn read<R>(&self, f: impl FnOnce(&AddressesState) -> R) -> R {
        self.store.read(f)
    }

    /// Makes `address` the current address of the asset.
    pub fn select_address(&self, address: &str) -> Result<()> {
        self.ensure_mounted()?;
        if !self.asset.owns(address) {
            return Err(Error::UnknownAddress(address.to_string()));
        }
        let address = address.to_string();
        self.store
            .write(ViewField::AddressCurrent, |s| s.address_current = address);
        Ok(())
    }

    /// Re-fetches every row's balance.
    pub fn refresh(&self) -> Result<()> {
        self.ensure_mounted()?;
        self.fetch_balances()
    }

    /// The asset as currently selected in the list, carrying the selected
    /// address and its last fetched balance.
    pub fn selected_asset(&self) -> Asset {
        let mut asset = self.asset.clone();
        self.store.read(|s| {
            if let Some(row) = s.row(&s.address_current) {
                asset.address = row.address.clone();
                if let Some(balance) = row.balance {
                    asset.balance = balance;
                }
            }
        });
        asset
    }

    pub fn props(&self) -> AddressesProps {
        self.store.read(|s| {
            AddressesProps::build(
                s,
                &self.asset.symbol,
                self.settings.balance_display_decimals,
            )
        })
    }

    /// Aborts in-flight fetches and detaches every observer. Idempotent.
    pub fn unmount(&self) {
        if !self.lifetime.is_open() {
            return;
        }
        self.lifetime.close();
        self.store.destroy();
        debug!("Unmounted address list for {}", self.asset.symbol);
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.lifetime.is_open() {
            Ok(())
        } else {
            Err(Error::ViewClosed)
        }
    }

    fn fetch_balances(&self) -> Result<()> {
        let mut fetches = Vec::new();
        self.store
            .write(ViewField::Addresses, |s| fetches = s.begin_fetches());

        for (address, generation) in fetches {
            let store = self.store.clone();
            let provider = self.provider.clone();
            let mounted = self.lifetime.guard();

            self.lifetime.spawn(async move {
                let outcome = provider.fetch_balance(&address).await.map_err(|e| {
                    warn!("Failed to fetch balance for {}: {}", address, e);
                    e.to_string()
                });
                if !mounted.is_mounted() {
                    debug!("Dropping balance result for unmounted address list");
                    return;
                }

                let mut collector = store.collect();
                if !collector.write_if(ViewField::Addresses, |s| {
                    s.apply_balance(&address, generation, outcome)
                }) {
                    debug!("Dropping superseded balance result for {}", address);
                }
                collector.emit();
            })?;
        }
        Ok(())
    }
}

impl Drop for AddressesView {
    fn drop(&mut self) {
        self.unmount();
    }
}
