//! Scriptable asset provider for tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Semaphore;

use super::assets_traits::AssetProviderTrait;
use crate::errors::{ProviderError, Result};

#[derive(Default)]
struct MockState {
    fee: Option<std::result::Result<Decimal, ProviderError>>,
    balances: HashMap<String, std::result::Result<Decimal, ProviderError>>,
    fee_calls: usize,
    balance_calls: Vec<String>,
}

/// Provider whose answers are set up front. Each fetch takes its answer when
/// it starts, so a fetch held open with [`MockAssetProvider::hold_fetches`]
/// returns what was configured at call time, once released.
#[derive(Clone)]
pub struct MockAssetProvider {
    symbol: String,
    color: String,
    address_prefix: String,
    state: Arc<Mutex<MockState>>,
    gate: Arc<Semaphore>,
    holding: Arc<AtomicBool>,
}

impl MockAssetProvider {
    /// Addresses are accepted when they start with `address_prefix` and
    /// have at least one more character.
    pub fn new(symbol: &str, color: &str, address_prefix: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            color: color.to_string(),
            address_prefix: address_prefix.to_string(),
            state: Arc::new(Mutex::new(MockState::default())),
            gate: Arc::new(Semaphore::new(0)),
            holding: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_fee(self, fee: Decimal) -> Self {
        self.state.lock().unwrap().fee = Some(Ok(fee));
        self
    }

    pub fn with_fee_error(self, error: ProviderError) -> Self {
        self.state.lock().unwrap().fee = Some(Err(error));
        self
    }

    pub fn with_balance(self, address: &str, balance: Decimal) -> Self {
        self.set_balance(address, Ok(balance));
        self
    }

    pub fn with_balance_error(self, address: &str, error: ProviderError) -> Self {
        self.set_balance(address, Err(error));
        self
    }

    pub fn set_fee(&self, fee: std::result::Result<Decimal, ProviderError>) {
        self.state.lock().unwrap().fee = Some(fee);
    }

    pub fn set_balance(&self, address: &str, balance: std::result::Result<Decimal, ProviderError>) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(address.to_string(), balance);
    }

    /// Makes every subsequent fetch wait for a [`release`](Self::release).
    pub fn hold_fetches(&self) {
        self.holding.store(true, Ordering::SeqCst);
    }

    /// Lets fetches started from now on complete immediately. Fetches already
    /// held keep waiting for a release.
    pub fn resume_fetches(&self) {
        self.holding.store(false, Ordering::SeqCst);
    }

    /// Lets `count` held fetches complete, oldest first.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    pub fn fee_calls(&self) -> usize {
        self.state.lock().unwrap().fee_calls
    }

    pub fn balance_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().balance_calls.clone()
    }

    async fn wait_for_gate(&self, held: bool) {
        if held {
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait]
impl AssetProviderTrait for MockAssetProvider {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn is_address_check(&self, address: &str) -> bool {
        address.len() > self.address_prefix.len() && address.starts_with(&self.address_prefix)
    }

    async fn fetch_recommended_fee(&self, _address: &str) -> Result<Decimal> {
        let held = self.holding.load(Ordering::SeqCst);
        let fee = {
            let mut state = self.state.lock().unwrap();
            state.fee_calls += 1;
            state.fee.clone()
        };
        self.wait_for_gate(held).await;
        match fee {
            Some(result) => Ok(result?),
            None => Err(ProviderError::FeeUnavailable("no fee configured".to_string()).into()),
        }
    }

    async fn fetch_balance(&self, address: &str) -> Result<Decimal> {
        let held = self.holding.load(Ordering::SeqCst);
        let balance = {
            let mut state = self.state.lock().unwrap();
            state.balance_calls.push(address.to_string());
            state.balances.get(address).cloned()
        };
        self.wait_for_gate(held).await;
        match balance {
            Some(result) => Ok(result?),
            None => Ok(Decimal::ZERO),
        }
    }
}
