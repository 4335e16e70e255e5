//! Use case for starting the clipboard watcher
//! 启动剪贴板监控器的用例

use std::sync::Arc;

use cn_core::ports::{WatcherControlError, WatcherControlPort};
use tracing::{info, info_span, Instrument};

/// Error type for clipboard watcher startup failures.
/// 剪贴板监控器启动失败的错误类型。
#[derive(Debug, thiserror::Error)]
pub enum StartClipboardWatcherError {
    #[error("Failed to start clipboard watcher: {0}")]
    StartFailed(String),
}

impl From<WatcherControlError> for StartClipboardWatcherError {
    fn from(err: WatcherControlError) -> Self {
        StartClipboardWatcherError::StartFailed(err.to_string())
    }
}

/// Use case for starting (or resuming) clipboard capture.
///
/// ## Behavior / 行为
/// - Requests the watcher to start through the `WatcherControlPort`
/// - Idempotent: starting an already running watcher is a no-op
pub struct StartClipboardWatcher {
    watcher_control: Arc<dyn WatcherControlPort>,
}

impl StartClipboardWatcher {
    pub fn new(watcher_control: Arc<dyn WatcherControlPort>) -> Self {
        Self { watcher_control }
    }

    pub async fn execute(&self) -> Result<(), StartClipboardWatcherError> {
        let span = info_span!("usecase.start_clipboard_watcher.execute");

        async {
            if self.watcher_control.is_running() {
                info!("Clipboard watcher already running");
                return Ok(());
            }

            self.watcher_control.start_watcher().await?;

            info!("Clipboard watcher started");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockWatcherControl {
        running: AtomicBool,
        start_calls: AtomicUsize,
        should_fail: bool,
    }

    #[async_trait]
    impl WatcherControlPort for MockWatcherControl {
        async fn start_watcher(&self) -> Result<(), WatcherControlError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                return Err(WatcherControlError::StartFailed("mock failure".to_string()));
            }
            self.running.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
            self.running.store(false, Ordering::SeqCst);
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.running.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn starts_watcher_once() {
        let watcher = Arc::new(MockWatcherControl::default());
        let use_case = StartClipboardWatcher::new(watcher.clone());

        use_case.execute().await.unwrap();
        use_case.execute().await.unwrap();

        assert!(watcher.is_running());
        assert_eq!(watcher.start_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn propagates_start_failure() {
        let watcher = Arc::new(MockWatcherControl {
            should_fail: true,
            ..Default::default()
        });
        let result = StartClipboardWatcher::new(watcher).execute().await;
        assert!(matches!(
            result,
            Err(StartClipboardWatcherError::StartFailed(_))
        ));
    }
}
