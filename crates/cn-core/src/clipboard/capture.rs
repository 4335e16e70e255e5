//! Capture state machine for the clipboard watcher.
//!
//! 剪贴板捕获状态机。
//!
//! The watcher polls the OS clipboard and feeds every snapshot into
//! [`CaptureState::observe`]. The state owns the dedup trackers (last text
//! hash, last image hash) and the echo-suppression mode, so the platform
//! runtime stays a thin timer loop.
//!
//! ## Modes
//!
//! ```text
//!            pause()              arm_suppression()
//! Watching ───────────▶ Paused ─────────────────────▶ PausedArmed
//!    ▲                    │ resume()                      │ resume()
//!    │                    ▼                               ▼
//!    └──────────────── Watching ◀── observe() ──── SuppressNext
//! ```
//!
//! A programmatic write walks `Watching → Paused → PausedArmed →
//! SuppressNext → Watching`. In `SuppressNext` the first tick that sees new
//! content is the echo: both trackers are resynchronized to it and nothing
//! is emitted. Ticks that still see the old content leave the suppression
//! armed, so a slow clipboard owner cannot push the echo past the window.
//! The window closes after [`ECHO_WINDOW_TICKS`] unchanged ticks; writing
//! content identical to what was already there never produces an echo.

use serde::{Deserialize, Serialize};

use super::{ClipContent, ClipKind, ContentHash, SystemClipboardSnapshot};

/// Unchanged ticks an armed suppression waits for the echo before it lapses.
pub const ECHO_WINDOW_TICKS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchMode {
    /// Normal polling; changes are captured.
    Watching,
    /// A programmatic write is in progress; ticks are ignored.
    Paused,
    /// Still paused, and the next observed tick after resume is an echo.
    PausedArmed,
    /// The next observed change is an echo of our own write.
    SuppressNext,
}

impl WatchMode {
    pub fn is_paused(self) -> bool {
        matches!(self, WatchMode::Paused | WatchMode::PausedArmed)
    }
}

/// Result of feeding one snapshot into the capture state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Watcher is paused; snapshot was not inspected.
    Skipped,
    /// Nothing new compared to the trackers.
    Unchanged,
    /// Change swallowed as an echo of a programmatic write.
    Suppressed,
    /// New user content; trackers already updated.
    Captured(ClipContent),
}

impl CaptureOutcome {
    pub fn captured_kind(&self) -> Option<ClipKind> {
        match self {
            CaptureOutcome::Captured(content) => Some(content.kind()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureState {
    last_text_hash: Option<ContentHash>,
    last_image_hash: Option<ContentHash>,
    mode: WatchMode,
    /// Unchanged ticks left before `SuppressNext` lapses.
    echo_ticks_left: u8,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureState {
    pub fn new() -> Self {
        Self {
            last_text_hash: None,
            last_image_hash: None,
            mode: WatchMode::Watching,
            echo_ticks_left: 0,
        }
    }

    /// Build a state whose trackers already reflect `snapshot`, so the
    /// first poll after start does not capture pre-existing content.
    pub fn primed(snapshot: &SystemClipboardSnapshot) -> Self {
        let mut state = Self::new();
        state.resync(snapshot);
        state
    }

    pub fn mode(&self) -> WatchMode {
        self.mode
    }

    pub fn last_text_hash(&self) -> Option<&ContentHash> {
        self.last_text_hash.as_ref()
    }

    pub fn last_image_hash(&self) -> Option<&ContentHash> {
        self.last_image_hash.as_ref()
    }

    pub fn pause(&mut self) {
        self.mode = match self.mode {
            WatchMode::Watching => WatchMode::Paused,
            // a pending suppression survives a second overlapping write
            WatchMode::SuppressNext | WatchMode::PausedArmed => WatchMode::PausedArmed,
            WatchMode::Paused => WatchMode::Paused,
        };
    }

    pub fn arm_suppression(&mut self) {
        self.mode = match self.mode {
            WatchMode::Paused | WatchMode::PausedArmed => WatchMode::PausedArmed,
            WatchMode::Watching | WatchMode::SuppressNext => {
                self.echo_ticks_left = ECHO_WINDOW_TICKS;
                WatchMode::SuppressNext
            }
        };
    }

    pub fn resume(&mut self) {
        self.mode = match self.mode {
            WatchMode::Paused => WatchMode::Watching,
            WatchMode::PausedArmed => {
                self.echo_ticks_left = ECHO_WINDOW_TICKS;
                WatchMode::SuppressNext
            }
            other => other,
        };
    }

    /// Feed one polled snapshot. Emits at most one capture per call, and the
    /// trackers are always updated before the outcome is returned.
    pub fn observe(&mut self, snapshot: &SystemClipboardSnapshot) -> CaptureOutcome {
        match self.mode {
            WatchMode::Paused | WatchMode::PausedArmed => CaptureOutcome::Skipped,
            WatchMode::SuppressNext if self.has_new_content(snapshot) => {
                self.resync(snapshot);
                self.mode = WatchMode::Watching;
                CaptureOutcome::Suppressed
            }
            WatchMode::SuppressNext => {
                self.echo_ticks_left = self.echo_ticks_left.saturating_sub(1);
                if self.echo_ticks_left == 0 {
                    self.mode = WatchMode::Watching;
                }
                CaptureOutcome::Unchanged
            }
            WatchMode::Watching => self.detect_change(snapshot),
        }
    }

    fn detect_change(&mut self, snapshot: &SystemClipboardSnapshot) -> CaptureOutcome {
        let image_hash = snapshot.image_hash();
        let text_hash = snapshot.text_hash();

        if let (Some(hash), Some(bytes)) = (&image_hash, &snapshot.image) {
            if self.last_image_hash.as_ref() != Some(hash) {
                // image copies often carry a textual placeholder; it must not
                // fire on its own next tick
                let content = ClipContent::Image {
                    bytes: bytes.clone(),
                };
                self.last_image_hash = image_hash;
                self.last_text_hash = text_hash;
                return CaptureOutcome::Captured(content);
            }
        }

        if let (Some(hash), Some(text)) = (&text_hash, snapshot.non_empty_text()) {
            if self.last_text_hash.as_ref() != Some(hash) {
                let content = ClipContent::Text {
                    text: text.to_string(),
                };
                self.last_text_hash = text_hash;
                self.last_image_hash = image_hash;
                return CaptureOutcome::Captured(content);
            }
        }

        CaptureOutcome::Unchanged
    }

    /// Whether `snapshot` holds an image or non-empty text the trackers
    /// have not seen.
    fn has_new_content(&self, snapshot: &SystemClipboardSnapshot) -> bool {
        let new_image = snapshot
            .image_hash()
            .is_some_and(|hash| self.last_image_hash.as_ref() != Some(&hash));
        let new_text = snapshot
            .text_hash()
            .is_some_and(|hash| self.last_text_hash.as_ref() != Some(&hash));
        new_image || new_text
    }

    fn resync(&mut self, snapshot: &SystemClipboardSnapshot) {
        self.last_text_hash = snapshot.text_hash();
        self.last_image_hash = snapshot.image_hash();
    }
}
