use serde::{Deserialize, Serialize};

/// Progress of an asynchronous fetch that feeds view state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Loading,
    Ready,
    /// The fetch failed; the view keeps its previous value and can retry.
    Failed { reason: String },
}

impl FetchStatus {
    pub fn failed(reason: impl Into<String>) -> Self {
        FetchStatus::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchStatus::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchStatus::Failed { .. })
    }
}
