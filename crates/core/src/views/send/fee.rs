use rust_decimal::Decimal;

use crate::utils::{parse_number, parse_number_or_zero};
use crate::views::FetchStatus;

/// Network fee for the send form: the provider's recommendation plus an
/// optional user override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeeState {
    recommended: Option<Decimal>,
    input: Option<String>,
    status: FetchStatus,
    /// Bumped on every fetch start; completions from older fetches are stale.
    generation: u64,
}

impl FeeState {
    /// Fee state before the recommendation has arrived.
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn recommended(&self) -> Option<Decimal> {
        self.recommended
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_overridden(&self) -> bool {
        self.input.is_some()
    }

    /// Marks a new fetch as in flight and returns its generation.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        self.generation
    }

    /// Applies the outcome of the fetch started as `generation`. Returns
    /// false, leaving the state untouched, when a newer fetch has started
    /// since.
    pub fn complete_fetch(&mut self, generation: u64, outcome: Result<Decimal, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        match outcome {
            Ok(fee) => self.set_recommended(fee),
            Err(reason) => self.set_failed(reason),
        }
        true
    }

    pub fn set_recommended(&mut self, fee: Decimal) {
        self.recommended = Some(fee);
        self.status = FetchStatus::Ready;
    }

    /// Records a failed fetch. A previously fetched recommendation is kept.
    pub fn set_failed(&mut self, reason: impl Into<String>) {
        self.status = FetchStatus::failed(reason);
    }

    /// Sets the user override. Blank text reverts to the recommendation.
    pub fn set_input(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.input = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Fee used for computation: the override, else the recommendation,
    /// else zero.
    pub fn current(&self) -> Decimal {
        match &self.input {
            Some(raw) => parse_number_or_zero(raw),
            None => self.recommended.unwrap_or(Decimal::ZERO),
        }
    }

    pub fn is_input_invalid(&self) -> bool {
        self.input
            .as_deref()
            .is_some_and(|raw| parse_number(raw).is_none())
    }
}
