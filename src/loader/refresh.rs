//! Periodic refresh task.
//!
//! DESIGN
//! ======
//! The first interval tick completes immediately and performs the initial
//! load; every later tick re-runs the loader's last input. The returned
//! [`RefreshTask`] owns the spawned task and aborts it on drop, so a torn
//! down panel never sees another tick.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::{Loader, Outcome, Panel};

/// Owned handle to a running refresh task. Dropping it stops the task.
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Stop the task now. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a task that loads `input` now and refreshes every `period`.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn spawn_refresh_task<P: Panel>(loader: Loader<P>, input: P::Input, period: Duration) -> RefreshTask {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        interval.tick().await;
        log_tick::<P>(loader.trigger(input).await);

        loop {
            interval.tick().await;
            log_tick::<P>(loader.refresh().await);
        }
    });
    RefreshTask { handle }
}

fn log_tick<P: Panel>(result: Result<Outcome, super::LoadError>) {
    match result {
        Ok(outcome) => debug!(panel = P::NAME, ?outcome, "refresh tick"),
        Err(e) => warn!(panel = P::NAME, error = %e, "refresh tick failed"),
    }
}

#[cfg(test)]
#[path = "refresh_test.rs"]
mod tests;
