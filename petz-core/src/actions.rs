//! Player actions: feed, play, sleep.
//!
//! Handlers never look at the current status first. Feeding a companion
//! that is already eating restarts the meal and grants the full bonus
//! again; rate limiting, if wanted, belongs to the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PetzError;
use crate::experience::apply_exp;
use crate::finalize::finalize;
use crate::normalize::renormalize;
use crate::types::{FinalizedState, PetState, PetStatus, clamp_stat};

/// Ticks an eating animation lasts after a feed.
pub const EATING_TICKS: u32 = 3;
/// Digestion progress queued by a feed.
pub const FEEDING_PROGRESS: f64 = 100.0;
/// Mood gained from a feed.
pub const FEED_MOOD: f64 = 3.0;
/// Experience granted by a feed.
pub const FEED_EXP: f64 = 5.0;

/// Ticks a play session lasts.
pub const PLAYING_TICKS: u32 = 5;
/// Mood gained from starting to play.
pub const PLAY_MOOD: f64 = 5.0;
/// Energy spent starting to play.
pub const PLAY_ENERGY_COST: f64 = 3.0;
/// Experience granted by a play.
pub const PLAY_EXP: f64 = 6.0;

/// Energy restored by going to sleep.
pub const SLEEP_ENERGY: f64 = 20.0;
/// Mood gained by going to sleep.
pub const SLEEP_MOOD: f64 = 3.0;

/// An explicit request from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Give the companion a meal.
    Feed,
    /// Start a play session.
    Play,
    /// Put the companion to sleep.
    Sleep,
}

/// A finalized action result together with its level-up flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// The new snapshot.
    pub state: FinalizedState,
    /// Whether the experience grant resolved a level-up.
    pub leveled_up: bool,
}

impl Action {
    /// Apply the matching handler.
    #[must_use]
    pub fn apply(self, state: &PetState) -> FinalizedState {
        self.resolve(state).state
    }

    /// Apply the matching handler and report whether it levelled up.
    ///
    /// The flag comes straight from [`apply_exp`], so it stays accurate
    /// even when the level counter is already saturated.
    #[must_use]
    pub fn resolve(self, state: &PetState) -> ActionOutcome {
        match self {
            Self::Feed => resolve_feed(state),
            Self::Play => resolve_play(state),
            Self::Sleep => ActionOutcome {
                state: sleep(state),
                leveled_up: false,
            },
        }
    }

    /// Wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Sleep => "sleep",
        }
    }

    /// Human-readable label, recorded as the last action performed.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "Fed",
            Self::Play => "Played",
            Self::Sleep => "Went to sleep",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PetzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feed" => Ok(Self::Feed),
            "play" => Ok(Self::Play),
            "sleep" => Ok(Self::Sleep),
            _ => Err(PetzError::UnknownAction(s.to_string())),
        }
    }
}

/// Feed: start a three-tick meal, queue digestion, +3 mood, +5 exp.
#[must_use]
pub fn feed(state: &PetState) -> FinalizedState {
    resolve_feed(state).state
}

fn resolve_feed(state: &PetState) -> ActionOutcome {
    let s = renormalize(state);
    let next = PetState {
        status: PetStatus::Eating,
        eating_duration: EATING_TICKS,
        feeding_progress: FEEDING_PROGRESS,
        mood: clamp_stat(s.mood + FEED_MOOD),
        ..s
    };
    granted(&next, FEED_EXP)
}

/// Play: start a five-tick session, +5 mood, -3 energy, +6 exp.
#[must_use]
pub fn play(state: &PetState) -> FinalizedState {
    resolve_play(state).state
}

fn resolve_play(state: &PetState) -> ActionOutcome {
    let s = renormalize(state);
    let next = PetState {
        status: PetStatus::Playing,
        playing_progress: PLAYING_TICKS,
        mood: clamp_stat(s.mood + PLAY_MOOD),
        energy: clamp_stat(s.energy - PLAY_ENERGY_COST),
        ..s
    };
    granted(&next, PLAY_EXP)
}

/// Sleep: +20 energy, +3 mood, enter `sleeping`. Grants no experience.
#[must_use]
pub fn sleep(state: &PetState) -> FinalizedState {
    let s = renormalize(state);
    let next = PetState {
        status: PetStatus::Sleeping,
        energy: clamp_stat(s.energy + SLEEP_ENERGY),
        mood: clamp_stat(s.mood + SLEEP_MOOD),
        ..s
    };
    finalize(next)
}

fn granted(state: &PetState, exp: f64) -> ActionOutcome {
    let outcome = apply_exp(state, exp);
    ActionOutcome {
        state: finalize(outcome.state),
        leveled_up: outcome.leveled_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PetState {
        PetState {
            status: PetStatus::Normal,
            mood: 50.0,
            exp: 0.0,
            level: 1,
            ..PetState::default()
        }
    }

    #[test]
    fn feed_starts_meal() {
        let out = feed(&base()).state;
        assert_eq!(out.status, PetStatus::Eating);
        assert_eq!(out.eating_duration, 3);
        assert_eq!(out.feeding_progress, 100.0);
        assert_eq!(out.mood, 53.0);
        assert_eq!(out.exp, 5.0);
        assert_eq!(out.level, 1);
    }

    #[test]
    fn feed_while_eating_resets_and_regrants() {
        let first = feed(&base()).into_state();
        let midway = PetState {
            eating_duration: 1,
            feeding_progress: 40.0,
            ..first
        };
        let again = feed(&midway).state;
        assert_eq!(again.eating_duration, 3);
        assert_eq!(again.feeding_progress, 100.0);
        assert_eq!(again.mood, 56.0);
        assert_eq!(again.exp, 10.0);
    }

    #[test]
    fn play_starts_session() {
        let before = base();
        let out = play(&before).state;
        assert_eq!(out.status, PetStatus::Playing);
        assert_eq!(out.playing_progress, 5);
        assert_eq!(out.mood, 55.0);
        assert_eq!(out.energy, before.energy - 3.0);
        assert_eq!(out.exp, 6.0);
    }

    #[test]
    fn play_can_level_up() {
        let near = PetState {
            exp: 47.0,
            health: 80.0,
            ..base()
        };
        let out = play(&near).state;
        assert_eq!(out.level, 2);
        assert_eq!(out.exp, 3.0);
        assert_eq!(out.health, 85.0);
    }

    #[test]
    fn sleep_restores_energy_without_exp() {
        let tired = PetState {
            energy: 90.0,
            ..base()
        };
        let out = sleep(&tired).state;
        assert_eq!(out.status, PetStatus::Sleeping);
        assert_eq!(out.energy, 100.0);
        assert_eq!(out.mood, 53.0);
        assert_eq!(out.exp, 0.0);
    }

    #[test]
    fn handlers_do_not_mutate_input() {
        let before = base();
        let snapshot = before.clone();
        let _ = feed(&before);
        let _ = play(&before);
        let _ = sleep(&before);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn action_names_parse() {
        assert_eq!("feed".parse::<Action>().ok(), Some(Action::Feed));
        assert_eq!(" Play ".parse::<Action>().ok(), Some(Action::Play));
        assert_eq!("SLEEP".parse::<Action>().ok(), Some(Action::Sleep));
        assert!(matches!(
            "dance".parse::<Action>(),
            Err(PetzError::UnknownAction(name)) if name == "dance"
        ));
    }

    #[test]
    fn resolve_reports_level_up() {
        let near = PetState {
            exp: 47.0,
            ..base()
        };
        let out = Action::Play.resolve(&near);
        assert!(out.leveled_up);
        assert_eq!(out.state, play(&near));

        assert!(!Action::Feed.resolve(&base()).leveled_up);
        assert!(!Action::Sleep.resolve(&near).leveled_up);
    }

    #[test]
    fn resolve_reports_level_up_at_level_cap() {
        let capped = PetState {
            level: u32::MAX,
            exp: crate::experience::level_threshold(u32::MAX) - 1.0,
            ..base()
        };
        let out = Action::Feed.resolve(&capped);
        assert!(out.leveled_up);
        assert_eq!(out.state.state.level, u32::MAX);
        assert_eq!(out.state.state.exp, 4.0);
    }

    #[test]
    fn apply_dispatches() {
        for action in [Action::Feed, Action::Play, Action::Sleep] {
            let expected = match action {
                Action::Feed => feed(&base()),
                Action::Play => play(&base()),
                Action::Sleep => sleep(&base()),
            };
            assert_eq!(action.apply(&base()), expected);
        }
    }
}
