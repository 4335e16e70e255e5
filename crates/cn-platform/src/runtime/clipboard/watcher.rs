//! Clipboard watcher
//!
//! Reads the local clipboard once per tick and feeds the snapshot into the
//! shared [`CaptureState`]. New user content is handed to the
//! [`ClipboardChangeHandler`]; everything else (unchanged content, echoes of
//! our own writes, paused ticks) stops here.
//!
//! ```text
//! Local Clipboard
//!      ↓
//! SystemClipboardPort
//!      ↓
//! ClipboardWatcher   (this module)
//!      ↓
//! ClipboardChangeHandler
//! ```
//!
//! The watcher never decides whether content is stored; it only decides
//! whether a tick produced a new user copy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use cn_core::clipboard::{CaptureOutcome, CaptureState, SystemClipboardSnapshot};
use cn_core::ports::{ClipboardChangeHandler, SystemClipboardPort};

use super::WatcherCaptureGate;

pub struct ClipboardWatcher {
    clipboard: Arc<dyn SystemClipboardPort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    state: Arc<Mutex<CaptureState>>,
    /// Set when priming could not read the clipboard; the next readable
    /// tick primes instead of capturing.
    prime_pending: AtomicBool,
}

impl ClipboardWatcher {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        handler: Arc<dyn ClipboardChangeHandler>,
    ) -> Self {
        Self {
            clipboard,
            handler,
            state: Arc::new(Mutex::new(CaptureState::new())),
            prime_pending: AtomicBool::new(false),
        }
    }

    /// Gate sharing this watcher's capture state, for programmatic writes.
    pub fn gate(&self) -> WatcherCaptureGate {
        WatcherCaptureGate::new(self.state.clone())
    }

    /// Align the trackers with the current clipboard so whatever is already
    /// there is not captured on the first tick.
    /// If the read fails, priming is deferred to the first tick that can
    /// read the clipboard.
    pub fn prime(&self) {
        match self.clipboard.read_snapshot() {
            Ok(snapshot) => {
                self.prime_with(&snapshot);
                self.prime_pending.store(false, Ordering::SeqCst);
            }
            Err(err) => {
                warn!(error = ?err, "Failed to read clipboard while priming watcher, deferring");
                self.prime_pending.store(true, Ordering::SeqCst);
            }
        }
    }

    fn prime_with(&self, snapshot: &SystemClipboardSnapshot) {
        let mut state = lock_state(&self.state);
        let mode = state.mode();
        *state = CaptureState::primed(snapshot);
        // a write already in flight keeps its pause/suppression
        restore_mode(&mut state, mode);
    }

    /// Check the clipboard once.
    ///
    /// Read and handler failures are logged and reported as
    /// [`CaptureOutcome::Unchanged`] / the captured outcome respectively;
    /// nothing propagates out of a tick.
    pub async fn check_once(&self) -> CaptureOutcome {
        let snapshot = match self.clipboard.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = ?err, "Clipboard read failed, treating tick as unchanged");
                return CaptureOutcome::Unchanged;
            }
        };

        if self.prime_pending.swap(false, Ordering::SeqCst) {
            debug!("Priming watcher from first readable tick");
            self.prime_with(&snapshot);
            return CaptureOutcome::Unchanged;
        }

        // trackers are updated inside observe, before anyone is told
        let outcome = lock_state(&self.state).observe(&snapshot);

        match &outcome {
            CaptureOutcome::Captured(content) => {
                debug!(kind = ?content.kind(), size = content.size_bytes(), "Clipboard change captured");
                if let Err(err) = self.handler.on_clip_captured(content.clone()).await {
                    warn!(error = ?err, "Clipboard change handler failed");
                }
            }
            CaptureOutcome::Suppressed => {
                debug!("Clipboard change suppressed as echo of programmatic write");
            }
            CaptureOutcome::Skipped | CaptureOutcome::Unchanged => {}
        }

        outcome
    }
}

pub(super) fn lock_state(state: &Mutex<CaptureState>) -> MutexGuard<'_, CaptureState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn restore_mode(state: &mut CaptureState, mode: cn_core::clipboard::WatchMode) {
    use cn_core::clipboard::WatchMode;

    match mode {
        WatchMode::Watching => {}
        WatchMode::Paused => state.pause(),
        WatchMode::PausedArmed => {
            state.pause();
            state.arm_suppression();
        }
        WatchMode::SuppressNext => state.arm_suppression(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use cn_core::clipboard::{ClipContent, WatchMode};
    use cn_core::ports::CaptureGatePort;

    #[derive(Default)]
    struct ScriptedClipboard {
        current: Mutex<Option<SystemClipboardSnapshot>>,
    }

    impl ScriptedClipboard {
        fn set_text(&self, text: &str) {
            *self.current.lock().unwrap() = Some(SystemClipboardSnapshot::with_text(0, text));
        }

        fn fail(&self) {
            *self.current.lock().unwrap() = None;
        }
    }

    impl SystemClipboardPort for ScriptedClipboard {
        fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
            self.current
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow!("clipboard busy"))
        }

        fn write(&self, content: &ClipContent) -> Result<()> {
            if let ClipContent::Text { text } = content {
                self.set_text(text);
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct CollectingHandler {
        captured: Mutex<Vec<ClipContent>>,
    }

    #[async_trait]
    impl ClipboardChangeHandler for CollectingHandler {
        async fn on_clip_captured(&self, content: ClipContent) -> Result<()> {
            self.captured.lock().unwrap().push(content);
            Ok(())
        }
    }

    fn watcher() -> (ClipboardWatcher, Arc<ScriptedClipboard>, Arc<CollectingHandler>) {
        let clipboard = Arc::new(ScriptedClipboard::default());
        let handler = Arc::new(CollectingHandler::default());
        (
            ClipboardWatcher::new(clipboard.clone(), handler.clone()),
            clipboard,
            handler,
        )
    }

    #[tokio::test]
    async fn primed_watcher_ignores_existing_content() {
        let (watcher, clipboard, handler) = watcher();
        clipboard.set_text("already there");
        watcher.prime();

        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);
        clipboard.set_text("new copy");
        assert!(matches!(watcher.check_once().await, CaptureOutcome::Captured(_)));
        assert_eq!(handler.captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn read_failure_is_an_unchanged_tick() {
        let (watcher, clipboard, handler) = watcher();
        clipboard.fail();

        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);
        assert!(handler.captured.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn programmatic_write_is_not_captured() {
        let (watcher, clipboard, handler) = watcher();
        clipboard.set_text("user copy");
        watcher.check_once().await;

        let gate = watcher.gate();
        gate.pause_capture();
        clipboard
            .write(&ClipContent::Text { text: "from history".into() })
            .unwrap();
        assert_eq!(watcher.check_once().await, CaptureOutcome::Skipped);
        gate.arm_echo_suppression();
        gate.resume_capture();

        assert_eq!(watcher.check_once().await, CaptureOutcome::Suppressed);
        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);
        assert_eq!(handler.captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_prime_defers_to_first_readable_tick() {
        let (watcher, clipboard, handler) = watcher();
        clipboard.fail();
        watcher.prime();

        // clipboard becomes readable with content that predates the app
        clipboard.set_text("copied before launch");
        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);
        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);
        assert!(handler.captured.lock().unwrap().is_empty());

        clipboard.set_text("first real copy");
        assert!(matches!(watcher.check_once().await, CaptureOutcome::Captured(_)));
        assert_eq!(handler.captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_tick_after_failed_prime_keeps_prime_pending() {
        let (watcher, clipboard, handler) = watcher();
        clipboard.fail();
        watcher.prime();
        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);

        clipboard.set_text("old");
        assert_eq!(watcher.check_once().await, CaptureOutcome::Unchanged);
        assert!(handler.captured.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn priming_keeps_a_pending_pause() {
        let (watcher, clipboard, _handler) = watcher();
        clipboard.set_text("x");
        watcher.gate().pause_capture();
        watcher.prime();

        assert_eq!(lock_state(&watcher.state).mode(), WatchMode::Paused);
    }
}
