mod gate;
mod runtime;
mod watcher;

pub use gate::WatcherCaptureGate;
pub use runtime::PollingClipboardRuntime;
pub use watcher::ClipboardWatcher;
