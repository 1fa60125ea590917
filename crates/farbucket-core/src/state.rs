//! Per-variant processing state machine

use serde::{Deserialize, Serialize};

/// Processing state of a single build variant.
///
/// State transitions:
/// ```text
/// Pending → Building → Packaging → Done
///    │                    ↑
///    └────────────────────┘ (skip-build)
///   Pending/Building/Packaging → Failed (on error)
/// ```
///
/// There is no retry: `Failed` and `Done` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantState {
    /// Variant is planned but not started
    #[default]
    Pending,
    /// External generator and executor are running
    Building,
    /// Packages and artifacts are being placed in the bucket
    Packaging,
    /// All sub-variants are in the bucket
    Done,
    /// A build or packaging step failed
    Failed,
}

impl VariantState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: VariantState) -> bool {
        use VariantState::*;
        matches!(
            (self, target),
            (Pending, Building)
                | (Pending, Packaging)
                | (Building, Packaging)
                | (Packaging, Done)
                | (Pending, Failed)
                | (Building, Failed)
                | (Packaging, Failed)
        )
    }

    /// Check if the variant is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, VariantState::Done | VariantState::Failed)
    }
}

impl std::fmt::Display for VariantState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantState::Pending => write!(f, "Pending"),
            VariantState::Building => write!(f, "Building"),
            VariantState::Packaging => write!(f, "Packaging"),
            VariantState::Done => write!(f, "Done"),
            VariantState::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
#[path = "state/state_tests.rs"]
mod state_tests;
