//! `AppHandle`-backed port implementations.
//!
//! These adapters must only be constructed inside the Tauri setup phase.

mod emitter;
mod hotkey;
mod notification;
mod surface;

pub use emitter::TauriEventEmitter;
pub use hotkey::TauriHotkey;
pub use notification::TauriNotifier;
pub use surface::TauriSurface;
