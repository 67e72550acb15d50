//! Finalizer — the last step of every public operation.

use crate::mood::derive_mood;
use crate::normalize::normalize;
use crate::types::{FinalizedState, RawState};

/// Normalize `state` and attach a freshly derived mood label.
///
/// Accepts anything convertible into a [`RawState`], so both raw records
/// and typed states can be finalized. Any label carried by the input is
/// ignored.
#[must_use]
pub fn finalize(state: impl Into<RawState>) -> FinalizedState {
    let state = normalize(&state.into());
    FinalizedState {
        derived_mood: derive_mood(&state),
        state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MoodLabel, PetState};

    #[test]
    fn label_matches_normalized_state() {
        let raw = RawState {
            satiation: Some(20.0),
            energy: Some(500.0),
            ..RawState::default()
        };
        let out = finalize(raw.clone());
        assert_eq!(out.state, normalize(&raw));
        assert_eq!(out.derived_mood, derive_mood(&normalize(&raw)));
        assert_eq!(out.derived_mood, MoodLabel::Restless);
    }

    #[test]
    fn stale_label_is_recomputed() {
        let stale = FinalizedState {
            state: PetState {
                energy: 5.0,
                ..PetState::default()
            },
            derived_mood: MoodLabel::Ecstatic,
        };
        let out = finalize(&stale);
        assert_eq!(out.derived_mood, MoodLabel::Exhausted);
    }
}
