//! Shared fakes for use case integration tests.
//! 集成测试共用的假实现。

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use cn_core::clipboard::{ClipContent, SystemClipboardSnapshot};
use cn_core::ports::{
    AppEvent, AppEventEmitterPort, CaptureGatePort, ClockPort, HotkeyPort, NotificationPort,
    SurfacePort, SystemClipboardPort, TaskNotification,
};

/// Clock whose time only moves when told to.
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn at(time: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(time.timestamp_millis())))
    }

    pub fn at_ms(ms: i64) -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(ms)))
    }

    pub fn set(&self, time: DateTime<Utc>) {
        self.0.store(time.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct RecordingEmitter {
    pub events: Mutex<Vec<AppEvent>>,
}

impl RecordingEmitter {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(AppEvent::name).collect()
    }
}

impl AppEventEmitterPort for RecordingEmitter {
    fn emit(&self, event: AppEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Notifier that records deliveries and can be switched to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<TaskNotification>>,
    pub failing: AtomicBool,
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn notify(&self, notification: TaskNotification) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("notification daemon unavailable"));
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

/// Records gate and clipboard calls into one shared, ordered log, stamped
/// with the (paused) tokio time elapsed since the log was created.
pub struct CallLog {
    start: tokio::time::Instant,
    entries: Mutex<Vec<String>>,
}

impl CallLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: tokio::time::Instant::now(),
            entries: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, label: &str) {
        let elapsed = self.start.elapsed().as_millis();
        self.entries.lock().unwrap().push(format!("{label}@{elapsed}"));
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

pub struct LoggingGate(pub Arc<CallLog>);

impl CaptureGatePort for LoggingGate {
    fn pause_capture(&self) {
        self.0.push("pause");
    }

    fn arm_echo_suppression(&self) {
        self.0.push("arm");
    }

    fn resume_capture(&self) {
        self.0.push("resume");
    }
}

pub struct FakeClipboard {
    pub log: Arc<CallLog>,
    pub fail_writes: bool,
    pub written: Mutex<Vec<ClipContent>>,
}

impl FakeClipboard {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            fail_writes: false,
            written: Mutex::new(Vec::new()),
        }
    }
}

impl SystemClipboardPort for FakeClipboard {
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
        Ok(SystemClipboardSnapshot::empty(0))
    }

    fn write(&self, content: &ClipContent) -> Result<()> {
        self.log.push("write");
        if self.fail_writes {
            return Err(anyhow!("clipboard locked by another process"));
        }
        self.written.lock().unwrap().push(content.clone());
        Ok(())
    }
}

/// Window stand-in. Readiness is flipped by the test.
#[derive(Default)]
pub struct FakeSurface {
    pub calls: Mutex<Vec<&'static str>>,
    pub ready: AtomicBool,
    pub probes: AtomicI64,
}

impl FakeSurface {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SurfacePort for FakeSurface {
    async fn show(&self) -> Result<()> {
        self.calls.lock().unwrap().push("show");
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        self.calls.lock().unwrap().push("hide");
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.calls.lock().unwrap().push("focus");
        Ok(())
    }

    async fn is_content_ready(&self) -> Result<bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(self.ready.load(Ordering::SeqCst))
    }

    async fn reset_content(&self) -> Result<()> {
        self.calls.lock().unwrap().push("reset");
        self.ready.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHotkey {
    pub registered: Mutex<Vec<String>>,
}

#[async_trait]
impl HotkeyPort for FakeHotkey {
    async fn is_registered(&self, accelerator: &str) -> Result<bool> {
        Ok(self.registered.lock().unwrap().iter().any(|a| a == accelerator))
    }

    async fn register(&self, accelerator: &str) -> Result<()> {
        self.registered.lock().unwrap().push(accelerator.to_string());
        Ok(())
    }
}
