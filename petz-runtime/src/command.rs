//! Line commands accepted by the headless driver.

use std::str::FromStr;

use petz_core::{Action, FinalizedState};
use serde::Serialize;

use crate::controller::{PetController, PetUpdate};
use crate::error::RuntimeError;

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run a player action.
    Act(Action),
    /// Apply one tick now, outside the schedule.
    Tick,
    /// Print the current snapshot.
    Status,
    /// Toggle pass-through.
    PassThrough,
    /// Stop the driver.
    Quit,
}

impl FromStr for Command {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tick" => Ok(Self::Tick),
            "status" => Ok(Self::Status),
            "pass-through" | "passthrough" => Ok(Self::PassThrough),
            "quit" | "exit" => Ok(Self::Quit),
            other => Ok(Self::Act(other.parse()?)),
        }
    }
}

/// What a command produced, printed as one JSON line.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// A transition happened.
    Update(Box<PetUpdate>),
    /// A read-only snapshot.
    Snapshot(FinalizedState),
}

impl Command {
    /// Run the command against `controller`. `Quit` produces no reply.
    pub fn execute(self, controller: &PetController) -> Option<Reply> {
        match self {
            Self::Act(action) => Some(Reply::Update(Box::new(controller.perform(action)))),
            Self::Tick => Some(Reply::Update(Box::new(controller.tick()))),
            Self::Status => Some(Reply::Snapshot(controller.snapshot())),
            Self::PassThrough => {
                controller.toggle_pass_through();
                Some(Reply::Snapshot(controller.snapshot()))
            }
            Self::Quit => None,
        }
    }
}
