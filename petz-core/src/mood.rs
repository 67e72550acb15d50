//! Mood classification from satiation and energy.
//!
//! Rules are evaluated in declaration order and the first match wins:
//!
//! | # | Condition                              | Label       |
//! |---|----------------------------------------|-------------|
//! | 1 | energy ≥ 90 and satiation ≥ 90         | `ecstatic`  |
//! | 2 | energy ≥ 70 and satiation ≥ 75         | `joyful`    |
//! | 3 | energy ≤ 15                            | `exhausted` |
//! | 4 | satiation ≤ 40 and energy ≥ 40         | `restless`  |
//! | 5 | satiation ≤ 25 and energy < 40         | `anxious`   |
//! | 6 | otherwise                              | `neutral`   |
//!
//! The order is a tie-break and must not be rearranged.

use crate::types::{MoodLabel, PetState};

/// Minimum energy for `ecstatic`.
pub const ECSTATIC_ENERGY: f64 = 90.0;
/// Minimum satiation for `ecstatic`.
pub const ECSTATIC_SATIATION: f64 = 90.0;
/// Minimum energy for `joyful`.
pub const JOYFUL_ENERGY: f64 = 70.0;
/// Minimum satiation for `joyful`.
pub const JOYFUL_SATIATION: f64 = 75.0;
/// Maximum energy for `exhausted`.
pub const EXHAUSTED_ENERGY: f64 = 15.0;
/// Maximum satiation for `restless`.
pub const RESTLESS_SATIATION: f64 = 40.0;
/// Minimum energy for `restless`.
pub const RESTLESS_ENERGY: f64 = 40.0;
/// Maximum satiation for `anxious`.
pub const ANXIOUS_SATIATION: f64 = 25.0;
/// Energy must be below this for `anxious`.
pub const ANXIOUS_ENERGY: f64 = 40.0;

/// Derive the qualitative mood label of a state.
#[must_use]
pub fn derive_mood(state: &PetState) -> MoodLabel {
    let PetState {
        satiation, energy, ..
    } = *state;

    if energy >= ECSTATIC_ENERGY && satiation >= ECSTATIC_SATIATION {
        MoodLabel::Ecstatic
    } else if energy >= JOYFUL_ENERGY && satiation >= JOYFUL_SATIATION {
        MoodLabel::Joyful
    } else if energy <= EXHAUSTED_ENERGY {
        MoodLabel::Exhausted
    } else if satiation <= RESTLESS_SATIATION && energy >= RESTLESS_ENERGY {
        MoodLabel::Restless
    } else if satiation <= ANXIOUS_SATIATION && energy < ANXIOUS_ENERGY {
        MoodLabel::Anxious
    } else {
        MoodLabel::Neutral
    }
}
