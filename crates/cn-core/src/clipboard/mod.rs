//! Clipboard domain: samples, snapshots, hashing and the capture state machine.

mod base64_bytes;
pub mod capture;
mod hash;
mod sample;
mod snapshot;

pub use capture::{CaptureOutcome, CaptureState, WatchMode, ECHO_WINDOW_TICKS};
pub use hash::{ContentHash, HashAlgorithm};
pub use sample::{truncate_chars, ClipContent, ClipKind, ClipSample};
pub use snapshot::SystemClipboardSnapshot;
