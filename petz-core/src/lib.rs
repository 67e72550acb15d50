//! # PETZ Core Library
//!
//! Deterministic state-transition engine for a persistent virtual companion.
//!
//! The companion is a single [`PetState`] value: five bounded needs, an
//! experience/level pair, an activity [`PetStatus`] and a few progress
//! counters. Every operation in this crate is a pure function from one
//! state value to the next:
//!
//! - **Normalize** — coerce any partial record into a canonical state ([`normalize()`])
//! - **Mood** — classify a state into a [`MoodLabel`] ([`derive_mood()`])
//! - **Experience** — grant exp and resolve level-ups ([`apply_exp()`])
//! - **Actions** — feed / play / sleep ([`actions`])
//! - **Tick** — per-time-unit decay and status machine ([`apply_tick()`])
//! - **Finalize** — re-normalize and attach the derived mood ([`finalize()`])
//!
//! ```text
//!   caller snapshot ──► normalize ──► feed/play/sleep ──► finalize ──► new snapshot
//!   caller snapshot ──► normalize ──► apply_tick      ──► finalize ──► new snapshot
//! ```
//!
//! The engine schedules nothing, performs no I/O and owns no shared state.
//! Serializing concurrent triggers against one snapshot is the caller's job.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod activity;
pub mod error;
pub mod experience;
pub mod finalize;
pub mod mood;
pub mod normalize;
pub mod tick;
pub mod types;

pub use actions::{Action, ActionOutcome, feed, play, sleep};
pub use activity::MovementHint;
pub use error::PetzError;
pub use experience::{ExpOutcome, apply_exp};
pub use finalize::finalize;
pub use mood::derive_mood;
pub use normalize::{normalize, renormalize};
pub use tick::apply_tick;
pub use types::*;
