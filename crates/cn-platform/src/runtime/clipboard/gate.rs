use std::sync::{Arc, Mutex};

use tracing::debug;

use cn_core::clipboard::CaptureState;
use cn_core::ports::CaptureGatePort;

use super::watcher::lock_state;

/// Pause/arm/resume handle onto a watcher's capture state.
///
/// 程序写入剪贴板时用来暂停监听、抑制回声。
#[derive(Clone)]
pub struct WatcherCaptureGate {
    state: Arc<Mutex<CaptureState>>,
}

impl WatcherCaptureGate {
    pub(super) fn new(state: Arc<Mutex<CaptureState>>) -> Self {
        Self { state }
    }
}

impl CaptureGatePort for WatcherCaptureGate {
    fn pause_capture(&self) {
        let mut state = lock_state(&self.state);
        state.pause();
        debug!(mode = ?state.mode(), "Capture paused");
    }

    fn arm_echo_suppression(&self) {
        let mut state = lock_state(&self.state);
        state.arm_suppression();
        debug!(mode = ?state.mode(), "Echo suppression armed");
    }

    fn resume_capture(&self) {
        let mut state = lock_state(&self.state);
        state.resume();
        debug!(mode = ?state.mode(), "Capture resumed");
    }
}
