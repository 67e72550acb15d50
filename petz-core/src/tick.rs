//! Tick engine — the per-time-unit status machine.
//!
//! One call advances the companion by one tick. Steps run in a fixed
//! order against a working copy of the state:
//!
//! 1. **Eating**: count down `eating_duration`, +1 mood per counted tick,
//!    back to `normal` when it reaches zero.
//! 2. **Playing**: count down `playing_progress`, +2 mood and -1 energy per
//!    counted tick, back to `normal` when it reaches zero.
//! 3. **Digestion** (any status): consume up to 10 feeding progress,
//!    +1 satiation per 5 consumed, +1 mood.
//! 4. **Status branch**, chosen by the status *before* the tick. Its deltas
//!    land on the working copy, on top of steps 1 to 3:
//!
//! | Pre-tick status | Effect                                  | Exit guard                  |
//! |-----------------|-----------------------------------------|-----------------------------|
//! | `sleeping`      | +4 energy, +1 mood                      | energy ≥ 65 → `normal`      |
//! | `foraging`      | +3 satiation, -0.5 energy, +1 mood      | satiation ≥ 50 → `normal`   |
//! | `normal`        | -1 satiation, -1 or -2 mood, -1 energy  | see below                   |
//! | `eating`/`playing` | nothing extra                        | —                           |
//!
//! From `normal`: satiation < 25 with energy > 30 starts `foraging`;
//! energy < 15 starts `sleeping` (overriding foraging); energy < 20 costs
//! one more mood.
//!
//! ```text
//!   normal ──feed──► eating   ──duration 0──► normal
//!   normal ──play──► playing  ──progress 0──► normal
//!   any    ──sleep─► sleeping ──energy≥65───► normal
//!   normal ──satiation<25 ∧ energy>30──► foraging ──satiation≥50──► normal
//!   normal ──energy<15──► sleeping
//! ```
//!
//! All stats are clamped to `[0, 100]` after every change.

use crate::finalize::finalize;
use crate::normalize::renormalize;
use crate::types::{FinalizedState, PetState, PetStatus, clamp_stat};

/// Mood gained per counted eating tick.
pub const EATING_MOOD_PER_TICK: f64 = 1.0;
/// Mood gained per counted playing tick.
pub const PLAYING_MOOD_PER_TICK: f64 = 2.0;
/// Energy spent per counted playing tick.
pub const PLAYING_ENERGY_PER_TICK: f64 = 1.0;

/// Maximum feeding progress digested per tick.
pub const DIGEST_PER_TICK: f64 = 10.0;
/// Feeding progress consumed per point of satiation restored.
pub const DIGEST_PER_SATIATION: f64 = 5.0;
/// Mood gained on any tick where digestion happens.
pub const DIGEST_MOOD: f64 = 1.0;

/// Energy recovered per sleeping tick.
pub const SLEEP_ENERGY_PER_TICK: f64 = 4.0;
/// Mood recovered per sleeping tick.
pub const SLEEP_MOOD_PER_TICK: f64 = 1.0;
/// Energy at which a sleeping companion wakes up.
pub const WAKE_ENERGY: f64 = 65.0;

/// Satiation found per foraging tick.
pub const FORAGE_SATIATION_PER_TICK: f64 = 3.0;
/// Energy spent per foraging tick.
pub const FORAGE_ENERGY_PER_TICK: f64 = 0.5;
/// Mood gained per foraging tick.
pub const FORAGE_MOOD_PER_TICK: f64 = 1.0;
/// Satiation at which foraging ends.
pub const FORAGE_DONE_SATIATION: f64 = 50.0;

/// Satiation lost per idle tick.
pub const IDLE_SATIATION_DECAY: f64 = 1.0;
/// Energy lost per idle tick.
pub const IDLE_ENERGY_DECAY: f64 = 1.0;
/// Mood lost per idle tick while fed.
pub const IDLE_MOOD_DECAY: f64 = 1.0;
/// Mood lost per idle tick while hungry.
pub const HUNGRY_MOOD_DECAY: f64 = 2.0;
/// Below this satiation, idle mood decay uses [`HUNGRY_MOOD_DECAY`].
pub const HUNGRY_SATIATION: f64 = 30.0;
/// Below this satiation (with enough energy) an idle companion forages.
pub const FORAGE_SATIATION: f64 = 25.0;
/// Foraging needs more than this much energy.
pub const FORAGE_MIN_ENERGY: f64 = 30.0;
/// Below this energy an idle companion falls asleep.
pub const SLEEP_ENERGY: f64 = 15.0;
/// Below this energy an idle companion loses an extra point of mood.
pub const TIRED_ENERGY: f64 = 20.0;

/// Advance the companion by one tick.
#[must_use]
pub fn apply_tick(state: &PetState) -> FinalizedState {
    let before = renormalize(state);
    let mut next = before.clone();

    advance_eating(&mut next);
    advance_playing(&mut next);
    digest(&mut next);

    match before.status {
        PetStatus::Sleeping => rest(&mut next),
        PetStatus::Foraging => forage(&mut next),
        PetStatus::Normal => idle(&mut next),
        // Steps 1 and 2 already covered this tick; no idle decay on top.
        PetStatus::Eating | PetStatus::Playing => {}
    }

    finalize(next)
}

fn advance_eating(s: &mut PetState) {
    if s.status != PetStatus::Eating {
        return;
    }
    if s.eating_duration > 0 {
        s.eating_duration -= 1;
        s.mood = clamp_stat(s.mood + EATING_MOOD_PER_TICK);
    }
    if s.eating_duration == 0 {
        s.status = PetStatus::Normal;
    }
}

fn advance_playing(s: &mut PetState) {
    if s.status != PetStatus::Playing {
        return;
    }
    if s.playing_progress > 0 {
        s.playing_progress -= 1;
        s.mood = clamp_stat(s.mood + PLAYING_MOOD_PER_TICK);
        s.energy = clamp_stat(s.energy - PLAYING_ENERGY_PER_TICK);
    }
    if s.playing_progress == 0 {
        s.status = PetStatus::Normal;
    }
}

fn digest(s: &mut PetState) {
    if s.feeding_progress <= 0.0 {
        return;
    }
    let consumed = s.feeding_progress.min(DIGEST_PER_TICK);
    s.feeding_progress = clamp_stat(s.feeding_progress - consumed);
    s.satiation = clamp_stat(s.satiation + (consumed / DIGEST_PER_SATIATION).floor());
    s.mood = clamp_stat(s.mood + DIGEST_MOOD);
}

fn rest(s: &mut PetState) {
    s.energy = clamp_stat(s.energy + SLEEP_ENERGY_PER_TICK);
    s.mood = clamp_stat(s.mood + SLEEP_MOOD_PER_TICK);
    if s.energy >= WAKE_ENERGY {
        s.status = PetStatus::Normal;
    }
}

fn forage(s: &mut PetState) {
    s.satiation = clamp_stat(s.satiation + FORAGE_SATIATION_PER_TICK);
    s.energy = clamp_stat(s.energy - FORAGE_ENERGY_PER_TICK);
    s.mood = clamp_stat(s.mood + FORAGE_MOOD_PER_TICK);
    if s.satiation >= FORAGE_DONE_SATIATION {
        s.status = PetStatus::Normal;
    }
}

fn idle(s: &mut PetState) {
    s.satiation = clamp_stat(s.satiation - IDLE_SATIATION_DECAY);
    let mood_decay = if s.satiation < HUNGRY_SATIATION {
        HUNGRY_MOOD_DECAY
    } else {
        IDLE_MOOD_DECAY
    };
    s.mood = clamp_stat(s.mood - mood_decay);
    s.energy = clamp_stat(s.energy - IDLE_ENERGY_DECAY);

    if s.satiation < FORAGE_SATIATION && s.energy > FORAGE_MIN_ENERGY {
        s.status = PetStatus::Foraging;
    }
    if s.energy < SLEEP_ENERGY {
        s.status = PetStatus::Sleeping;
    }
    if s.energy < TIRED_ENERGY {
        s.mood = clamp_stat(s.mood - 1.0);
    }
}
