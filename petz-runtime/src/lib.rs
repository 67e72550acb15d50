//! # PETZ Runtime
//!
//! Hosts a [`petz_core`] companion for a long-running process:
//!
//! - [`controller`] — single-writer owner of the snapshot; applies actions,
//!   ticks and edits one at a time and broadcasts each result
//! - [`persistence`] — SQLite (or in-memory) snapshot store
//! - [`scheduler`] — periodic tick task
//! - [`command`] — line commands for the headless `petz` binary
//! - [`config`] — TOML configuration

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod persistence;
pub mod scheduler;

pub use command::{Command, Reply};
pub use config::PetzConfig;
pub use controller::{PetController, PetUpdate, Trigger};
pub use error::{Result, RuntimeError};
pub use persistence::{MemoryStore, SqliteStore, StateStore};
pub use scheduler::spawn_tick_loop;
