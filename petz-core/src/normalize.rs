//! Normalizer — coerce any partial record into a canonical [`PetState`].
//!
//! Total and idempotent: every input yields a valid state and
//! `normalize(normalize(x)) == normalize(x)`.
//!
//! | Field                         | Missing / non-finite | Otherwise            |
//! |-------------------------------|----------------------|----------------------|
//! | satiation, mood, cleanliness, energy, health | baseline | clamp `[0, 100]` |
//! | exp                           | 0                    | floor at 0           |
//! | level                         | 1                    | round, floor at 1    |
//! | feedingProgress               | 0                    | clamp `[0, 100]`     |
//! | playingProgress, eatingDuration | 0                  | round, floor at 0    |
//! | status                        | `normal`             | exact name or `normal` |
//! | direction                     | `right`              | exact name or `right`  |
//! | passThrough                   | false                | as given             |

use crate::types::{
    DEFAULT_CLEANLINESS, DEFAULT_ENERGY, DEFAULT_HEALTH, DEFAULT_MOOD, DEFAULT_SATIATION,
    Direction, PetState, PetStatus, RawState, clamp_stat,
};

/// Coerce a raw record into a canonical state.
#[must_use]
pub fn normalize(raw: &RawState) -> PetState {
    PetState {
        satiation: bounded(raw.satiation, DEFAULT_SATIATION),
        mood: bounded(raw.mood, DEFAULT_MOOD),
        cleanliness: bounded(raw.cleanliness, DEFAULT_CLEANLINESS),
        energy: bounded(raw.energy, DEFAULT_ENERGY),
        health: bounded(raw.health, DEFAULT_HEALTH),
        exp: finite(raw.exp).map_or(0.0, |exp| exp.max(0.0)),
        level: finite(raw.level).map_or(1, |level| to_count(level).max(1)),
        status: raw
            .status
            .as_deref()
            .and_then(PetStatus::parse)
            .unwrap_or(PetStatus::Normal),
        direction: raw
            .direction
            .as_deref()
            .and_then(Direction::parse)
            .unwrap_or(Direction::Right),
        pass_through: raw.pass_through.unwrap_or(false),
        feeding_progress: finite(raw.feeding_progress).map_or(0.0, clamp_stat),
        playing_progress: finite(raw.playing_progress).map_or(0, to_count),
        eating_duration: finite(raw.eating_duration).map_or(0, to_count),
    }
}

/// Re-run the normalizer over an already-typed state.
///
/// Typed states can still carry out-of-range or non-finite floats when a
/// caller builds them by hand; this brings them back into range.
#[must_use]
pub fn renormalize(state: &PetState) -> PetState {
    normalize(&RawState::from(state))
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn bounded(value: Option<f64>, default: f64) -> f64 {
    clamp_stat(finite(value).unwrap_or(default))
}

/// Round to the nearest whole count. Negative values become 0 and values
/// beyond `u32::MAX` saturate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_is_baseline() {
        assert_eq!(normalize(&RawState::default()), PetState::default());
    }

    #[test]
    fn bounded_fields_are_clamped() {
        let raw = RawState {
            satiation: Some(150.0),
            mood: Some(-20.0),
            cleanliness: Some(55.5),
            energy: Some(100.0),
            health: Some(0.0),
            ..RawState::default()
        };
        let s = normalize(&raw);
        assert_eq!(s.satiation, 100.0);
        assert_eq!(s.mood, 0.0);
        assert_eq!(s.cleanliness, 55.5);
        assert_eq!(s.energy, 100.0);
        assert_eq!(s.health, 0.0);
    }

    #[test]
    fn non_finite_values_fall_back_to_baseline() {
        let raw = RawState {
            satiation: Some(f64::NAN),
            mood: Some(f64::INFINITY),
            energy: Some(f64::NEG_INFINITY),
            exp: Some(f64::NAN),
            level: Some(f64::INFINITY),
            feeding_progress: Some(f64::NAN),
            ..RawState::default()
        };
        let s = normalize(&raw);
        assert_eq!(s.satiation, DEFAULT_SATIATION);
        assert_eq!(s.mood, DEFAULT_MOOD);
        assert_eq!(s.energy, DEFAULT_ENERGY);
        assert_eq!(s.exp, 0.0);
        assert_eq!(s.level, 1);
        assert_eq!(s.feeding_progress, 0.0);
    }

    #[test]
    fn exp_and_level_floors() {
        let raw = RawState {
            exp: Some(-12.0),
            level: Some(-3.0),
            ..RawState::default()
        };
        let s = normalize(&raw);
        assert_eq!(s.exp, 0.0);
        assert_eq!(s.level, 1);

        let rounded = normalize(&RawState {
            level: Some(3.6),
            ..RawState::default()
        });
        assert_eq!(rounded.level, 4);
    }

    #[test]
    fn progress_counters() {
        let raw = RawState {
            feeding_progress: Some(240.0),
            playing_progress: Some(240.0),
            eating_duration: Some(-4.0),
            ..RawState::default()
        };
        let s = normalize(&raw);
        assert_eq!(s.feeding_progress, 100.0);
        // Playing progress has no upper bound.
        assert_eq!(s.playing_progress, 240);
        assert_eq!(s.eating_duration, 0);
    }

    #[test]
    fn invalid_enums_reset() {
        let raw = RawState {
            status: Some("dancing".into()),
            direction: Some("up".into()),
            ..RawState::default()
        };
        let s = normalize(&raw);
        assert_eq!(s.status, PetStatus::Normal);
        assert_eq!(s.direction, Direction::Right);

        let valid = normalize(&RawState {
            status: Some("foraging".into()),
            direction: Some("left".into()),
            pass_through: Some(true),
            ..RawState::default()
        });
        assert_eq!(valid.status, PetStatus::Foraging);
        assert_eq!(valid.direction, Direction::Left);
        assert!(valid.pass_through);
    }

    #[test]
    fn renormalize_repairs_hand_built_state() {
        let broken = PetState {
            mood: 180.0,
            energy: f64::NAN,
            exp: -1.0,
            level: 0,
            ..PetState::default()
        };
        let fixed = renormalize(&broken);
        assert_eq!(fixed.mood, 100.0);
        assert_eq!(fixed.energy, DEFAULT_ENERGY);
        assert_eq!(fixed.exp, 0.0);
        assert_eq!(fixed.level, 1);
    }

    #[test]
    fn idempotent_on_mixed_input() {
        let raw = RawState {
            satiation: Some(-5.0),
            mood: Some(250.0),
            level: Some(2.4),
            status: Some("sleeping".into()),
            playing_progress: Some(3.5),
            ..RawState::default()
        };
        let once = normalize(&raw);
        let twice = renormalize(&once);
        assert_eq!(once, twice);
    }
}
