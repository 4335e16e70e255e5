//! System clipboard port.
//!
//! 系统剪贴板端口：读取快照、写入内容。

use anyhow::Result;

use crate::clipboard::{ClipContent, SystemClipboardSnapshot};

/// Platform-agnostic access to the OS clipboard.
///
/// Calls are synchronous; the platform adapters are cheap and the watcher
/// already runs them off the UI thread.
pub trait SystemClipboardPort: Send + Sync {
    /// Read whatever the clipboard holds right now. An empty clipboard is an
    /// empty snapshot, not an error.
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot>;

    /// Replace the clipboard content.
    fn write(&self, content: &ClipContent) -> Result<()>;
}
