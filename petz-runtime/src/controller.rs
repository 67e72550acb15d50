//! Single-writer controller that owns the companion snapshot.
//!
//! Player actions, scheduled ticks and the pass-through toggle all go
//! through one [`PetController`]. The snapshot and its store
//! sit behind a single lock, so triggers are applied one at a time and
//! each one sees the result of the previous one.
//!
//! After each transition the new snapshot is persisted and a [`PetUpdate`]
//! is broadcast to any subscribed presentation collaborators.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use petz_core::{Action, FinalizedState, MovementHint, PetState, apply_tick, finalize};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::PetzConfig;
use crate::persistence::{StateStore, load_or_default, open_store};

/// Capacity of the update broadcast channel.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// A player action.
    Action(Action),
    /// A scheduled tick.
    Tick,
    /// The pass-through flag was toggled.
    PassThrough,
    /// A caller-supplied edit through [`PetController::with_state`].
    Edit,
}

/// The outcome of one transition, as handed to presentation collaborators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    /// When the transition was applied.
    pub at: DateTime<Utc>,
    /// What caused it.
    pub trigger: Trigger,
    /// The new snapshot.
    pub state: FinalizedState,
    /// Description of the current activity.
    pub activity: &'static str,
    /// Label of the most recent player action, if any.
    pub last_action: Option<&'static str>,
    /// Whether an experience grant in this transition resolved a level-up.
    pub leveled_up: bool,
    /// Whether the status changed.
    pub status_changed: bool,
    /// Auto-movement hint, present only when the status changed.
    pub movement: Option<MovementHint>,
}

struct Inner {
    state: FinalizedState,
    last_action: Option<Action>,
    store: Box<dyn StateStore + Send>,
    slot: String,
    persist_on_tick: bool,
}

impl Inner {
    fn commit(
        &mut self,
        trigger: Trigger,
        next: FinalizedState,
        leveled_up: bool,
        persist: bool,
    ) -> PetUpdate {
        let before = &self.state.state;
        let status_changed = next.state.status != before.status;
        let movement = MovementHint::for_transition(before.status, next.state.status);

        if status_changed {
            info!(
                trigger = ?trigger,
                from = %before.status,
                to = %next.state.status,
                "Companion status changed"
            );
        }
        if leveled_up {
            info!(level = next.state.level, "Companion levelled up");
        }

        if let Trigger::Action(action) = trigger {
            self.last_action = Some(action);
        }
        self.state = next;

        if persist {
            if let Err(e) = self.store.save(&self.slot, &self.state) {
                warn!(
                    slot = %self.slot,
                    backend = self.store.backend(),
                    error = %e,
                    "Failed to persist companion snapshot"
                );
            }
        }

        PetUpdate {
            at: Utc::now(),
            trigger,
            state: self.state.clone(),
            activity: self.state.state.status.activity(),
            last_action: self.last_action.map(Action::label),
            leveled_up,
            status_changed,
            movement,
        }
    }
}

/// Owner of the companion snapshot. Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct PetController {
    inner: Arc<Mutex<Inner>>,
    updates: broadcast::Sender<PetUpdate>,
}

impl std::fmt::Debug for PetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PetController")
            .field("slot", &inner.slot)
            .field("backend", &inner.store.backend())
            .field("status", &inner.state.state.status)
            .finish_non_exhaustive()
    }
}

impl PetController {
    /// Create a controller over `store`, restoring whatever is saved under `slot`.
    pub fn new(store: Box<dyn StateStore + Send>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let state = load_or_default(store.as_ref(), &slot);
        info!(
            slot = %slot,
            backend = store.backend(),
            status = %state.state.status,
            level = state.state.level,
            mood = %state.derived_mood,
            "Companion restored"
        );

        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                last_action: None,
                store,
                slot,
                persist_on_tick: true,
            })),
            updates,
        }
    }

    /// Create a controller from configuration, opening the configured store.
    #[must_use]
    pub fn from_config(config: &PetzConfig) -> Self {
        let store = open_store(&config.persistence);
        let controller = Self::new(store, config.persistence.slot.clone());
        controller.set_persist_on_tick(config.tick.persist_on_tick);
        controller
    }

    /// Whether scheduled ticks persist the snapshot. Actions always persist.
    pub fn set_persist_on_tick(&self, enabled: bool) {
        self.inner.lock().persist_on_tick = enabled;
    }

    /// Subscribe to transition updates.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PetUpdate> {
        self.updates.subscribe()
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FinalizedState {
        self.inner.lock().state.clone()
    }

    /// Most recent player action, if any.
    #[must_use]
    pub fn last_action(&self) -> Option<Action> {
        self.inner.lock().last_action
    }

    /// Apply a player action.
    pub fn perform(&self, action: Action) -> PetUpdate {
        let update = {
            let mut inner = self.inner.lock();
            let outcome = action.resolve(&inner.state.state);
            let next = outcome.state;
            info!(
                action = %action,
                status = %next.state.status,
                mood = %next.derived_mood,
                exp = next.state.exp,
                "Action performed"
            );
            inner.commit(Trigger::Action(action), next, outcome.leveled_up, true)
        };
        self.publish(&update);
        update
    }

    /// Advance the companion by one tick.
    pub fn tick(&self) -> PetUpdate {
        let update = {
            let mut inner = self.inner.lock();
            let next = apply_tick(&inner.state.state);
            debug!(
                status = %next.state.status,
                satiation = next.state.satiation,
                energy = next.state.energy,
                mood = %next.derived_mood,
                "Tick applied"
            );
            let persist = inner.persist_on_tick;
            inner.commit(Trigger::Tick, next, false, persist)
        };
        self.publish(&update);
        update
    }

    /// Flip the pass-through flag and return its new value.
    pub fn toggle_pass_through(&self) -> bool {
        let update = self.with_state_as(Trigger::PassThrough, |mut s| {
            s.pass_through = !s.pass_through;
            s
        });
        info!(enabled = update.state.state.pass_through, "Pass-through toggled");
        update.state.state.pass_through
    }

    /// Read-modify-write the snapshot with a caller-supplied edit.
    ///
    /// The edit's result is normalized and finalized before it is stored,
    /// so out-of-range values are clamped rather than kept.
    pub fn with_state<F>(&self, edit: F) -> PetUpdate
    where
        F: FnOnce(PetState) -> PetState,
    {
        self.with_state_as(Trigger::Edit, edit)
    }

    fn with_state_as<F>(&self, trigger: Trigger, edit: F) -> PetUpdate
    where
        F: FnOnce(PetState) -> PetState,
    {
        let update = {
            let mut inner = self.inner.lock();
            let next = finalize(edit(inner.state.state.clone()));
            inner.commit(trigger, next, false, true)
        };
        self.publish(&update);
        update
    }

    fn publish(&self, update: &PetUpdate) {
        // No subscribers is fine.
        let _ = self.updates.send(update.clone());
    }
}
