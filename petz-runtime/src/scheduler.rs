//! Periodic tick driver.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::controller::PetController;

/// Spawn a task that ticks `controller` once per `period`.
///
/// The first tick fires one full period after spawning. If the task falls
/// behind, missed ticks are delayed rather than burst. The loop exits when
/// `shutdown` becomes `true` or its sender is dropped, and the handle
/// resolves to the number of ticks applied.
pub fn spawn_tick_loop(
    controller: PetController,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = period.as_secs_f64(), "Tick loop started");

        let mut ticks: u64 = 0;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let update = controller.tick();
                    ticks += 1;
                    debug!(ticks, status = %update.state.state.status, "Scheduled tick");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(ticks, "Tick loop stopped");
        ticks
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Trigger;
    use crate::persistence::MemoryStore;
    use petz_core::PetStatus;

    fn controller() -> PetController {
        PetController::new(Box::new(MemoryStore::new()), "petState")
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let c = controller();
        let mut rx = c.subscribe();
        let (tx, shutdown) = watch::channel(false);
        let handle = spawn_tick_loop(c.clone(), Duration::from_secs(60), shutdown);

        tokio::time::sleep(Duration::from_secs(185)).await;
        tx.send(true).expect("send shutdown");
        let ticks = handle.await.expect("join");

        assert_eq!(ticks, 3);
        // Idle normal ticks drain 1 energy each.
        assert_eq!(c.snapshot().state.energy, 82.0);
        for _ in 0..3 {
            assert_eq!(rx.try_recv().expect("update").trigger, Trigger::Tick);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_before_first_period() {
        let c = controller();
        let (tx, shutdown) = watch::channel(false);
        let handle = spawn_tick_loop(c.clone(), Duration::from_secs(60), shutdown);

        tokio::time::sleep(Duration::from_secs(59)).await;
        tx.send(true).expect("send shutdown");
        assert_eq!(handle.await.expect("join"), 0);
        assert_eq!(c.snapshot().state, petz_core::PetState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sender_stops_loop() {
        let c = controller();
        let (tx, shutdown) = watch::channel(false);
        let handle = spawn_tick_loop(c, Duration::from_secs(1), shutdown);
        drop(tx);
        assert_eq!(handle.await.expect("join"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn actions_interleave_with_ticks() {
        let c = controller();
        let (tx, shutdown) = watch::channel(false);
        let handle = spawn_tick_loop(c.clone(), Duration::from_secs(10), shutdown);

        c.perform(petz_core::Action::Feed);
        tokio::time::sleep(Duration::from_secs(35)).await;
        tx.send(true).expect("send shutdown");
        assert_eq!(handle.await.expect("join"), 3);
        assert_eq!(c.snapshot().state.status, PetStatus::Normal);
    }
}
