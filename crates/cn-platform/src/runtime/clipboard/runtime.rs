//! Polling clipboard runtime.
//!
//! Owns the watcher's background task: start primes the watcher and spawns
//! a tokio interval loop, stop aborts it. Both are idempotent. A push-based
//! runtime can replace this without touching the watcher or the use cases.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::AbortHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use cn_core::ports::{WatcherControlError, WatcherControlPort};

use super::ClipboardWatcher;

pub struct PollingClipboardRuntime {
    watcher: Arc<ClipboardWatcher>,
    poll_interval: Duration,
    running: AtomicBool,
    handle: Mutex<Option<AbortHandle>>,
}

impl PollingClipboardRuntime {
    pub fn new(watcher: Arc<ClipboardWatcher>, poll_interval: Duration) -> Self {
        Self {
            watcher,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
            running: AtomicBool::new(false),
            handle: Mutex::new(None),
        }
    }

    pub fn watcher(&self) -> &Arc<ClipboardWatcher> {
        &self.watcher
    }
}

#[async_trait]
impl WatcherControlPort for PollingClipboardRuntime {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(()); // 幂等
        }

        self.watcher.prime();

        let watcher = self.watcher.clone();
        let period = self.poll_interval;
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick completes immediately; priming already covered it
            ticker.tick().await;

            loop {
                ticker.tick().await;
                watcher.check_once().await;
            }
        });

        let previous = self
            .handle
            .lock()
            .map_err(|_| WatcherControlError::StartFailed("runtime handle lock poisoned".into()))?
            .replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }

        info!(poll_interval_ms = period.as_millis() as u64, "Clipboard watcher started");
        Ok(())
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        if !self.running.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let handle = self
            .handle
            .lock()
            .map_err(|_| WatcherControlError::StopFailed("runtime handle lock poisoned".into()))?
            .take();
        if let Some(handle) = handle {
            handle.abort(); // polling 是可直接 abort 的
            debug!("Clipboard polling task aborted");
        }

        info!("Clipboard watcher stopped");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use cn_core::clipboard::{ClipContent, SystemClipboardSnapshot};
    use cn_core::ports::{ClipboardChangeHandler, SystemClipboardPort};
    use std::sync::atomic::AtomicUsize;

    struct CountingClipboard {
        reads: AtomicUsize,
    }

    impl SystemClipboardPort for CountingClipboard {
        fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(SystemClipboardSnapshot::with_text(0, format!("copy {n}")))
        }

        fn write(&self, _content: &ClipContent) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingHandler(AtomicUsize);

    #[async_trait]
    impl ClipboardChangeHandler for CountingHandler {
        async fn on_clip_captured(&self, _content: ClipContent) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn runtime() -> (PollingClipboardRuntime, Arc<CountingHandler>) {
        let clipboard = Arc::new(CountingClipboard {
            reads: AtomicUsize::new(0),
        });
        let handler = Arc::new(CountingHandler::default());
        let watcher = Arc::new(ClipboardWatcher::new(clipboard, handler.clone()));
        (
            PollingClipboardRuntime::new(watcher, Duration::from_millis(500)),
            handler,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn polls_at_the_configured_interval() {
        let (runtime, handler) = runtime();
        runtime.start_watcher().await.unwrap();

        tokio::time::sleep(Duration::from_millis(1_250)).await;
        // every read returns new text: one capture per tick at 500 and 1000 ms
        assert_eq!(handler.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_are_idempotent() {
        let (runtime, handler) = runtime();

        runtime.start_watcher().await.unwrap();
        runtime.start_watcher().await.unwrap();
        assert!(runtime.is_running());

        runtime.stop_watcher().await.unwrap();
        runtime.stop_watcher().await.unwrap();
        assert!(!runtime.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(handler.0.load(Ordering::SeqCst), 0);
    }
}
