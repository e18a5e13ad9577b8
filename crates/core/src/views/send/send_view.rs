use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::send_model::SendState;
use super::send_props::{SendProps, SendPropsContext};
use crate::assets::{Asset, AssetProviderTrait, AssetRegistry};
use crate::errors::{Error, Result};
use crate::fx::{PriceBook, PriceQuote};
use crate::settings::WalletSettings;
use crate::store::{StoreObserver, SubscriptionId, ViewField, ViewStore};
use crate::views::ViewLifetime;

/// View model behind the send-funds form.
///
/// Mounting starts the fee and balance fetches. Every user intent writes the
/// store inside one collector, so a renderer observing the view re-reads
/// [`SendView::props`] exactly once per intent or fetch completion.
pub struct SendView {
    asset: Asset,
    provider: Arc<dyn AssetProviderTrait>,
    settings: WalletSettings,
    store: Arc<ViewStore<SendState>>,
    lifetime: ViewLifetime,
}

impl SendView {
    /// Mounts the form for `asset`. Must be called inside a tokio runtime.
    pub fn mount(
        asset: Asset,
        provider: Arc<dyn AssetProviderTrait>,
        price: Option<PriceQuote>,
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

        let store = Arc::new(ViewStore::new(SendState::new(asset.balance, price)));
        let view = SendView {
            asset,
            provider,
            settings,
            store,
            lifetime: ViewLifetime::new(),
        };

        view.fetch_balance()?;
        view.fetch_recommended_fee()?;
        info!("Mounted send view for {} ({})", view.asset.symbol, view.asset.id);
        Ok(view)
    }

    /// Mounts the form, resolving the provider and price by the asset symbol.
    pub fn mount_with_registry(
        asset: Asset,
        registry: &AssetRegistry,
        prices: &PriceBook,
        settings: WalletSettings,
    ) -> Result<Self> {
        let provider = registry.get(&asset.symbol)?;
        if !prices.currency().eq_ignore_ascii_case(&settings.currency) {
            warn!(
                "Price book is quoted in {} but the wallet currency is {}",
                prices.currency(),
                settings.currency
            );
        }
        let price = prices.quote(&asset.symbol);
        Self::mount(asset, provider, price, settings)
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
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

    /// Runs `f` against a consistent snapshot of the form state.
    pub fn read<R>(&self, f: impl FnOnce(&SendState) -> R) -> R {
        self.store.read(f)
    }

    pub fn set_address(&self, raw: &str) -> Result<()> {
        self.ensure_mounted()?;
        let is_valid = self.provider.is_address_check(raw.trim());
        self.store
            .write(ViewField::AddressInput, |s| s.set_address(raw, is_valid));
        Ok(())
    }

    pub fn set_crypto_amount(&self, raw: &str) -> Result<()> {
        self.ensure_mounted()?;
        self.store
            .write(ViewField::Amount, |s| s.set_crypto_amount(raw));
        Ok(())
    }

    pub fn set_fiat_amount(&self, raw: &str) -> Result<()> {
        self.ensure_mounted()?;
        self.store
            .write(ViewField::Amount, |s| s.set_fiat_amount(raw));
        Ok(())
    }

    pub fn set_max(&self) -> Result<()> {
        self.ensure_mounted()?;
        self.store.write(ViewField::Amount, |s| s.set_max());
        Ok(())
    }

    /// Overrides the recommended fee. Blank text reverts to the recommendation.
    pub fn set_fee(&self, raw: &str) -> Result<()> {
        self.ensure_mounted()?;
        self.store.write(ViewField::Fee, |s| s.fee.set_input(raw));
        Ok(())
    }

    pub fn set_password(&self, raw: &str) -> Result<()> {
        self.ensure_mounted()?;
        self.store
            .write(ViewField::PasswordInput, |s| s.set_password(raw));
        Ok(())
    }

    /// Replaces the live price; derived amounts follow on the next props read.
    pub fn update_price(&self, quote: Option<PriceQuote>) -> Result<()> {
        self.ensure_mounted()?;
        self.store.write(ViewField::Price, |s| s.price = quote);
        Ok(())
    }

    pub fn retry_fee(&self) -> Result<()> {
        self.ensure_mounted()?;
        self.fetch_recommended_fee()
    }

    pub fn retry_balance(&self) -> Result<()> {
        self.ensure_mounted()?;
        self.fetch_balance()
    }

    pub fn is_enough_balance(&self) -> bool {
        self.store.read(|s| s.is_enough_balance())
    }

    pub fn is_valid_form(&self) -> bool {
        self.store.read(|s| s.is_valid_form())
    }

    pub fn props(&self) -> SendProps {
        self.props_at(Utc::now())
    }

    /// Builds props as of `now`, which only affects price staleness.
    pub fn props_at(&self, now: DateTime<Utc>) -> SendProps {
        let ctx = SendPropsContext {
            color: self.provider.color(),
            symbol: &self.asset.symbol,
            currency: &self.settings.currency,
            price_max_age: self.settings.price_max_age(),
            now,
        };
        self.store.read(|s| SendProps::build(s, &ctx))
    }

    /// Aborts in-flight fetches and detaches every observer. Idempotent.
    pub fn unmount(&self) {
        if !self.lifetime.is_open() {
            return;
        }
        self.lifetime.close();
        self.store.destroy();
        debug!("Unmounted send view for {}", self.asset.symbol);
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.lifetime.is_open() {
            Ok(())
        } else {
            Err(Error::ViewClosed)
        }
    }

    fn fetch_recommended_fee(&self) -> Result<()> {
        let mut generation = 0;
        self.store
            .write(ViewField::Fee, |s| generation = s.fee.begin_fetch());

        let store = self.store.clone();
        let provider = self.provider.clone();
        let address = self.asset.address.clone();
        let mounted = self.lifetime.guard();
        debug!("Fetching recommended {} fee for {}", self.asset.symbol, address);

        self.lifetime.spawn(async move {
            let outcome = provider
                .fetch_recommended_fee(&address)
                .await
                .map_err(|e| {
                    warn!("Failed to fetch recommended fee for {}: {}", address, e);
                    e.to_string()
                });
            if !mounted.is_mounted() {
                debug!("Dropping fee result for unmounted send view");
                return;
            }

            let mut collector = store.collect();
            if !collector.write_if(ViewField::Fee, |s| s.fee.complete_fetch(generation, outcome)) {
                debug!("Dropping superseded fee result for {}", address);
            }
            collector.emit();
        })
    }

    fn fetch_balance(&self) -> Result<()> {
        let mut generation = 0;
        self.store
            .write(ViewField::Balance, |s| generation = s.begin_balance_fetch());

        let store = self.store.clone();
        let provider = self.provider.clone();
        let address = self.asset.address.clone();
        let mounted = self.lifetime.guard();
        debug!("Fetching {} balance for {}", self.asset.symbol, address);

        self.lifetime.spawn(async move {
            let outcome = provider.fetch_balance(&address).await.map_err(|e| {
                warn!("Failed to fetch balance for {}: {}", address, e);
                e.to_string()
            });
            if !mounted.is_mounted() {
                debug!("Dropping balance result for unmounted send view");
                return;
            }

            let mut collector = store.collect();
            if !collector.write_if(ViewField::Balance, |s| {
                s.complete_balance_fetch(generation, outcome)
            }) {
                debug!("Dropping superseded balance result for {}", address);
            }
            collector.emit();
        })
    }
}

impl Drop for SendView {
    fn drop(&mut self) {
        self.unmount();
    }
}
