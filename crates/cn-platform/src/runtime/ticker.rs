//! Periodic background tasks (due-task scan, hotkey check).
//!
//! 周期性后台任务。

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Stops its task when [`TickerHandle::stop`] is called or the handle is
/// dropped.
#[derive(Debug)]
pub struct TickerHandle {
    name: &'static str,
    abort: AbortHandle,
}

impl TickerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stop(&self) {
        self.abort.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Run `tick` every `period`, first after `startup_delay`. A failing tick is
/// logged and the schedule continues; ticks never overlap.
pub fn spawn_periodic<F, Fut>(
    name: &'static str,
    startup_delay: Duration,
    period: Duration,
    mut tick: F,
) -> TickerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + startup_delay, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!(ticker = name, ?startup_delay, ?period, "Ticker started");

        loop {
            ticker.tick().await;
            if let Err(err) = tick().await {
                warn!(ticker = name, error = ?err, "Tick failed");
            }
        }
    });

    TickerHandle {
        name,
        abort: handle.abort_handle(),
    }
}
