//! Activity descriptors for presentation collaborators.
//!
//! The engine decides the status; these helpers only describe it, so a UI
//! can show a line of text and decide whether the companion wanders.

use serde::{Deserialize, Serialize};

use crate::types::PetStatus;

impl PetStatus {
    /// One-line description of what the companion is doing.
    #[must_use]
    pub fn activity(self) -> &'static str {
        match self {
            Self::Sleeping => "Resting to recover energy",
            Self::Eating => "Enjoying a meal",
            Self::Playing => "Playing happily",
            Self::Foraging => "Foraging for food on its own",
            Self::Normal => "Drifting about, slowly spending energy",
        }
    }

    /// Whether the companion should hold still in this status.
    #[must_use]
    pub fn is_stationary(self) -> bool {
        matches!(self, Self::Sleeping | Self::Eating | Self::Playing)
    }
}

/// What the presentation layer should do with auto-movement after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementHint {
    /// Stop wandering.
    Stop,
    /// Resume wandering.
    Resume,
}

impl MovementHint {
    /// Hint for a `before → after` transition, or `None` if the status did not change.
    #[must_use]
    pub fn for_transition(before: PetStatus, after: PetStatus) -> Option<Self> {
        if before == after {
            return None;
        }
        Some(if after.is_stationary() {
            Self::Stop
        } else {
            Self::Resume
        })
    }
}
