//! Tests for the SendView lifecycle and intents.
//!
//! # Contract Points
//!
//! 1. Mount starts exactly one fee fetch and one balance fetch
//! 2. Each intent or fetch completion produces exactly one notification
//! 3. Fetch failures surface as a retryable `FetchStatus::Failed`
//! 4. Completions arriving after unmount never write state

#[cfg(test)]
mod tests {
    use crate::assets::{Asset, AssetRegistry, MockAssetProvider};
    use crate::errors::{Error, ProviderError};
    use crate::fx::{PriceBook, PriceQuote};
    use crate::settings::WalletSettings;
    use crate::store::{MockStoreObserver, ViewField};
    use crate::views::send::{DrivingField, SendView};
    use crate::views::FetchStatus;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    const ADDRESS: &str = "1SenderAddress";

    fn btc_asset() -> Asset {
        Asset::new("btc-main", "BTC", ADDRESS).with_balance(dec!(0.5))
    }

    fn provider() -> MockAssetProvider {
        MockAssetProvider::new("BTC", "#f7931a", "1")
            .with_fee(dec!(0.0001))
            .with_balance(ADDRESS, dec!(2))
    }

    fn mount(provider: &MockAssetProvider, price: Option<Decimal>) -> SendView {
        SendView::mount(
            btc_asset(),
            Arc::new(provider.clone()),
            price.map(PriceQuote::now),
            WalletSettings::default(),
        )
        .unwrap()
    }

    /// Yields to the runtime until `condition` holds.
    async fn settle(view: &SendView, condition: impl Fn(&SendView) -> bool) {
        for _ in 0..100 {
            if condition(view) {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("view did not settle");
    }

    async fn mounted_and_loaded(provider: &MockAssetProvider) -> SendView {
        let view = mount(provider, Some(dec!(100)));
        settle(&view, |v| {
            v.read(|s| s.fee.status().is_ready() && s.balance_status.is_ready())
        })
        .await;
        view
    }

    // =========================================================================
    // Mount & fetches
    // =========================================================================

    #[tokio::test]
    async fn test_mount_fetches_fee_and_balance() {
        let provider = provider();
        let view = mount(&provider, Some(dec!(100)));

        let initial = view.props();
        assert!(initial.fee_status.is_loading());
        assert_eq!(initial.balance, dec!(0.5));
        assert_eq!(initial.amount1_input, "0");
        assert_eq!(initial.color, "#f7931a");

        settle(&view, |v| v.read(|s| s.fee.status().is_ready() && s.balance_status.is_ready())).await;

        let props = view.props();
        assert_eq!(props.fee, dec!(0.0001));
        assert_eq!(props.balance, dec!(2));
        assert_eq!(provider.fee_calls(), 1);
        assert_eq!(provider.balance_calls(), vec![ADDRESS.to_string()]);
    }

    #[tokio::test]
    async fn test_each_completion_emits_once() {
        let provider = provider();
        let view = mount(&provider, Some(dec!(100)));
        let observer = MockStoreObserver::new();
        view.observe(Arc::new(observer.clone()));

        settle(&view, |v| v.read(|s| s.fee.status().is_ready() && s.balance_status.is_ready())).await;

        assert_eq!(observer.len(), 2);
        assert!(observer.batches().contains(&vec![ViewField::Fee]));
        assert!(observer.batches().contains(&vec![ViewField::Balance]));
    }

    #[tokio::test]
    async fn test_mount_rejects_mismatched_provider() {
        let provider = MockAssetProvider::new("ETH", "#627eea", "0x");
        let result = SendView::mount(
            btc_asset(),
            Arc::new(provider),
            None,
            WalletSettings::default(),
        );
        assert!(matches!(result, Err(Error::UnsupportedAsset(_))));
    }

    #[tokio::test]
    async fn test_mount_with_registry_resolves_provider_and_price() {
        let provider = provider();
        let registry = AssetRegistry::new().with_provider(Arc::new(provider.clone()));
        let mut prices = PriceBook::new("USD");
        prices.update("BTC", PriceQuote::now(dec!(100)));

        let view =
            SendView::mount_with_registry(btc_asset(), &registry, &prices, WalletSettings::default())
                .unwrap();
        view.set_crypto_amount("2").unwrap();

        assert_eq!(view.props().amount2_input, "200.00");
    }

    #[tokio::test]
    async fn test_mount_with_registry_unknown_symbol() {
        let registry = AssetRegistry::new();
        let prices = PriceBook::new("USD");
        let result =
            SendView::mount_with_registry(btc_asset(), &registry, &prices, WalletSettings::default());
        assert!(matches!(result, Err(Error::UnsupportedAsset(_))));
    }

    #[test]
    fn test_mount_outside_runtime_fails() {
        let provider = provider();
        let result = SendView::mount(
            btc_asset(),
            Arc::new(provider),
            None,
            WalletSettings::default(),
        );
        assert!(matches!(result, Err(Error::Runtime(_))));
    }

    // =========================================================================
    // Failures & retry
    // =========================================================================

    #[tokio::test]
    async fn test_fee_failure_is_surfaced_and_retryable() {
        let provider = MockAssetProvider::new("BTC", "#f7931a", "1")
            .with_fee_error(ProviderError::Network("timeout".to_string()))
            .with_balance(ADDRESS, dec!(1));
        let view = mount(&provider, Some(dec!(100)));

        settle(&view, |v| v.read(|s| s.fee.status().is_failed())).await;
        let props = view.props();
        assert_eq!(props.fee, Decimal::ZERO);
        assert_eq!(
            props.fee_status,
            FetchStatus::failed("Asset provider error: Network error: timeout")
        );
        assert!(!props.is_valid_form);

        provider.set_fee(Ok(dec!(0.0002)));
        view.retry_fee().unwrap();
        assert!(view.props().fee_status.is_loading());

        settle(&view, |v| v.read(|s| s.fee.status().is_ready())).await;
        assert_eq!(view.props().fee, dec!(0.0002));
        assert_eq!(provider.fee_calls(), 2);
    }

    #[tokio::test]
    async fn test_balance_failure_keeps_cached_balance() {
        let provider = MockAssetProvider::new("BTC", "#f7931a", "1")
            .with_fee(dec!(0.0001))
            .with_balance_error(ADDRESS, ProviderError::BalanceUnavailable("node down".into()));
        let view = mount(&provider, None);

        settle(&view, |v| v.read(|s| s.balance_status.is_failed())).await;
        assert_eq!(view.props().balance, dec!(0.5));

        provider.set_balance(ADDRESS, Ok(dec!(0.75)));
        view.retry_balance().unwrap();
        settle(&view, |v| v.read(|s| s.balance_status.is_ready())).await;
        assert_eq!(view.props().balance, dec!(0.75));
    }

    #[tokio::test]
    async fn test_superseded_fee_fetch_does_not_overwrite_retry() {
        let provider = MockAssetProvider::new("BTC", "#f7931a", "1")
            .with_fee_error(ProviderError::Network("old timeout".to_string()))
            .with_balance(ADDRESS, dec!(2));
        provider.hold_fetches();
        let view = mount(&provider, Some(dec!(100)));
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        provider.resume_fetches();
        provider.set_fee(Ok(dec!(0.0002)));
        view.retry_fee().unwrap();
        settle(&view, |v| v.read(|s| s.fee.status().is_ready())).await;

        // Completes the mount-time balance and fee fetches, the fee one failing.
        provider.release(2);
        settle(&view, |v| v.read(|s| s.balance_status.is_ready())).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        let props = view.props();
        assert_eq!(props.fee_status, FetchStatus::Ready);
        assert_eq!(props.fee, dec!(0.0002));
        assert_eq!(provider.fee_calls(), 2);
    }

    #[tokio::test]
    async fn test_superseded_balance_fetch_does_not_overwrite_retry() {
        let provider = MockAssetProvider::new("BTC", "#f7931a", "1")
            .with_fee(dec!(0.0001))
            .with_balance_error(ADDRESS, ProviderError::BalanceUnavailable("node down".into()));
        provider.hold_fetches();
        let view = mount(&provider, None);
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        provider.resume_fetches();
        provider.set_balance(ADDRESS, Ok(dec!(0.75)));
        view.retry_balance().unwrap();
        settle(&view, |v| v.read(|s| s.balance_status.is_ready())).await;

        provider.release(2);
        settle(&view, |v| v.read(|s| s.fee.status().is_ready())).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        let props = view.props();
        assert_eq!(props.balance_status, FetchStatus::Ready);
        assert_eq!(props.balance, dec!(0.75));
    }

    // =========================================================================
    // Intents
    // =========================================================================

    #[tokio::test]
    async fn test_end_to_end_amount_sync() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;

        view.set_crypto_amount("2").unwrap();
        let props = view.props();
        assert_eq!(props.amount1_input, "2");
        assert_eq!(props.amount2_input, "200.00");

        view.set_fiat_amount("150").unwrap();
        let props = view.props();
        assert_eq!(props.amount2_input, "150");
        assert_eq!(props.amount1_input, "1.5000000000");
        assert_eq!(view.read(|s| s.amounts.driving()), DrivingField::Fiat);
    }

    #[tokio::test]
    async fn test_full_form_becomes_submittable() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;

        view.set_address("  1RecipientAddress ").unwrap();
        view.set_password("secret").unwrap();
        view.set_crypto_amount("1").unwrap();

        let props = view.props();
        assert_eq!(props.address_input, "1RecipientAddress");
        assert!(!props.address_input_error);
        assert!(props.is_enough_balance);
        assert!(props.is_valid_form);
        assert_eq!(props.fee_fiat, "$0.01");
    }

    #[tokio::test]
    async fn test_invalid_address_is_flagged() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;

        view.set_address("bc-nope").unwrap();
        assert!(view.props().address_input_error);
        assert!(!view.is_valid_form());
    }

    #[tokio::test]
    async fn test_set_max_uses_fetched_balance() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;

        view.set_fiat_amount("10").unwrap();
        view.set_max().unwrap();

        let props = view.props();
        assert_eq!(props.amount1_input, "1.9999");
        assert_eq!(props.amount2_input, "199.99");
        assert!(view.is_enough_balance());
    }

    #[tokio::test]
    async fn test_fee_override_changes_max() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;

        view.set_fee("0.5").unwrap();
        view.set_max().unwrap();
        assert_eq!(view.props().amount1_input, "1.5");

        view.set_fee("").unwrap();
        assert_eq!(view.props().fee, dec!(0.0001));
    }

    #[tokio::test]
    async fn test_unparsable_amount_is_visible_but_blocks_submit() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;
        view.set_address("1RecipientAddress").unwrap();
        view.set_password("secret").unwrap();

        view.set_crypto_amount("1..2").unwrap();
        let props = view.props();
        assert_eq!(props.amount1_input, "1..2");
        assert!(props.amount_input_invalid);
        assert!(!props.is_valid_form);
    }

    #[tokio::test]
    async fn test_price_update_rederives_fiat() {
        let provider = provider();
        let view = mount(&provider, None);
        let observer = MockStoreObserver::new();
        view.observe(Arc::new(observer.clone()));

        view.set_crypto_amount("3").unwrap();
        assert_eq!(view.props().amount2_input, "");
        assert!(!view.props().price_available);

        view.update_price(Some(PriceQuote::now(dec!(10)))).unwrap();
        assert_eq!(view.props().amount2_input, "30.00");
        assert!(observer.saw(ViewField::Price));
    }

    #[tokio::test]
    async fn test_intent_emits_single_notification() {
        let provider = provider();
        let view = mounted_and_loaded(&provider).await;
        let observer = MockStoreObserver::new();
        let id = view.observe(Arc::new(observer.clone()));

        view.set_max().unwrap();
        assert_eq!(observer.batches(), vec![vec![ViewField::Amount]]);

        assert!(view.unobserve(id));
        view.set_password("pw").unwrap();
        assert_eq!(observer.len(), 1);
    }

    // =========================================================================
    // Unmount
    // =========================================================================

    #[tokio::test]
    async fn test_late_completion_after_unmount_is_discarded() {
        let provider = provider();
        provider.hold_fetches();
        let view = mount(&provider, Some(dec!(100)));
        let observer = MockStoreObserver::new();
        view.observe(Arc::new(observer.clone()));

        // Let both fetches reach the gate before tearing down.
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        view.unmount();
        provider.release(2);
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        assert!(!view.is_mounted());
        assert!(observer.is_empty());
        view.read(|s| {
            assert!(s.fee.status().is_loading());
            assert_eq!(s.balance, dec!(0.5));
        });
    }

    #[tokio::test]
    async fn test_intents_after_unmount_are_rejected() {
        let provider = provider();
        let view = mount(&provider, Some(dec!(100)));
        view.unmount();
        view.unmount();

        assert!(matches!(view.set_crypto_amount("1"), Err(Error::ViewClosed)));
        assert!(matches!(view.retry_fee(), Err(Error::ViewClosed)));
        assert!(matches!(view.set_max(), Err(Error::ViewClosed)));
        assert_eq!(view.read(|s| s.amounts.input().to_string()), "0");
    }
}
