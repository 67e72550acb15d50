//! Experience and levelling.
//!
//! Reaching `level * EXP_PER_LEVEL` experience consumes that amount,
//! raises the level by one and restores a little health. At most one
//! level-up is resolved per call; any surplus carries over as exp.

use crate::normalize::renormalize;
use crate::types::{PetState, clamp_stat};

/// Experience needed per level: advancing from level `n` costs `n * EXP_PER_LEVEL`.
pub const EXP_PER_LEVEL: f64 = 50.0;

/// Health restored on level-up.
pub const LEVEL_UP_HEALTH_BONUS: f64 = 5.0;

/// Result of [`apply_exp`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExpOutcome {
    /// The state after experience was applied.
    pub state: PetState,
    /// Whether a level-up happened.
    pub leveled_up: bool,
}

/// Experience required to advance from `level` to `level + 1`.
#[must_use]
pub fn level_threshold(level: u32) -> f64 {
    f64::from(level) * EXP_PER_LEVEL
}

/// Grant `gained` experience. Negative or non-finite gains count as zero.
#[must_use]
pub fn apply_exp(state: &PetState, gained: f64) -> ExpOutcome {
    let mut next = renormalize(state);
    let gained = if gained.is_finite() { gained.max(0.0) } else { 0.0 };

    next.exp += gained;

    let need = level_threshold(next.level);
    let leveled_up = next.exp >= need;
    if leveled_up {
        next.exp -= need;
        next.level = next.level.saturating_add(1);
        next.health = clamp_stat(next.health + LEVEL_UP_HEALTH_BONUS);
    }

    ExpOutcome {
        state: next,
        leveled_up,
    }
}
