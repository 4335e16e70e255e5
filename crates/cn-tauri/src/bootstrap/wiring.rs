//! # Dependency Wiring / 依赖装配
//!
//! Startup happens in two phases:
//!
//! 1. [`create_seed`] runs before Tauri: settings, record store, clock and
//!    system clipboard need no `AppHandle`.
//! 2. [`AppRuntime::build`] runs in the Tauri setup closure and adds the
//!    `AppHandle`-backed adapters (window, hotkey, notifications, events).
//!
//! Commands reach use cases through [`AppRuntime::usecases`], which builds
//! each use case on demand from the shared [`AppDeps`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use tauri::AppHandle;
use tracing::{error, info, warn};

use cn_app::usecases::clipboard::{
    CopyToClipboard, DeleteClip, HandleClipCaptured, ListClips, PinClip, WriteTiming,
};
use cn_app::usecases::presentation::{
    EnsureHotkeyRegistered, HandleNotificationActivation, ReadinessPolicy, ToggleCoordinator,
};
use cn_app::usecases::reminder::{
    CompleteTask, CreateTask, DeleteTask, EditTask, ListTasks, ScanDueTasks, SnoozeTask,
};
use cn_app::usecases::settings::{GetSettings, UpdateSettings};
use cn_app::usecases::{StartClipboardWatcher, StopClipboardWatcher};
use cn_app::AppDeps;
use cn_core::ports::SystemClipboardPort;
use cn_core::presentation::ToggleStateMachine;
use cn_core::Settings;
use cn_infra::{RecordStore, SystemClock};
use cn_platform::app_dirs::DirsAppDirsAdapter;
use cn_platform::clipboard::LocalClipboard;
use cn_platform::runtime::clipboard::{ClipboardWatcher, PollingClipboardRuntime};
use cn_platform::runtime::{spawn_periodic, TickerHandle};

use super::config::{load_settings, LoadedSettings};
use crate::adapters::{TauriEventEmitter, TauriHotkey, TauriNotifier, TauriSurface};

/// Label of the popup window declared in `tauri.conf.json`.
pub const SURFACE_WINDOW_LABEL: &str = "main";

/// Everything that can be built before the Tauri app exists.
pub struct AppRuntimeSeed {
    pub loaded: LoadedSettings,
    pub store: Arc<RecordStore>,
    pub clock: Arc<SystemClock>,
    pub system_clipboard: Arc<dyn SystemClipboardPort>,
}

pub async fn create_seed() -> anyhow::Result<AppRuntimeSeed> {
    let loaded = load_settings(&DirsAppDirsAdapter::new()).await?;

    let store_path = loaded.app_dirs.store_path();
    let store = match RecordStore::open(&store_path).await {
        Ok(store) => store,
        Err(err) => {
            error!(
                path = %store_path.display(),
                error = ?err,
                "Failed to open record store, continuing with a volatile store"
            );
            RecordStore::in_memory()
        }
    };

    let system_clipboard =
        Arc::new(LocalClipboard::new().context("initialize system clipboard")?);

    Ok(AppRuntimeSeed {
        loaded,
        store: Arc::new(store),
        clock: Arc::new(SystemClock),
        system_clipboard,
    })
}

/// Application runtime with dependencies, managed as Tauri state.
///
/// 包含所有应用依赖的运行时。
pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
    /// Settings as loaded at startup; intervals and limits below are taken
    /// from this snapshot.
    settings: Settings,
    surface: Arc<TauriSurface>,
    coordinator: Arc<ToggleCoordinator>,
    ensure_hotkey: Arc<EnsureHotkeyRegistered>,
    tickers: Mutex<Vec<TickerHandle>>,
}

impl AppRuntime {
    pub fn build(seed: AppRuntimeSeed, app: &AppHandle) -> Self {
        let AppRuntimeSeed {
            loaded,
            store,
            clock,
            system_clipboard,
        } = seed;
        let settings = loaded.settings;

        let emitter = Arc::new(TauriEventEmitter::new(app.clone()));
        let surface = Arc::new(TauriSurface::new(app.clone(), SURFACE_WINDOW_LABEL));
        let hotkey = Arc::new(TauriHotkey::new(app.clone()));

        let capture_handler = Arc::new(HandleClipCaptured::new(
            store.clone(),
            emitter.clone(),
            clock.clone(),
            settings.capture.max_clips,
        ));
        let watcher = Arc::new(ClipboardWatcher::new(system_clipboard.clone(), capture_handler));
        let capture_gate = Arc::new(watcher.gate());
        let watcher_control = Arc::new(PollingClipboardRuntime::new(
            watcher,
            Duration::from_millis(settings.capture.poll_interval_ms),
        ));

        let deps = AppDeps {
            system_clipboard,
            capture_gate,
            watcher_control,
            clip_repo: store.clone(),
            task_repo: store,
            notifier: Arc::new(TauriNotifier::new(app.clone())),
            surface: surface.clone(),
            hotkey: hotkey.clone(),
            emitter: emitter.clone(),
            settings: loaded.repository,
            clock: clock.clone(),
        };

        let ensure_hotkey = Arc::new(EnsureHotkeyRegistered::new(
            hotkey,
            settings.presentation.hotkey.clone(),
        ));
        let coordinator = ToggleCoordinator::new(
            ToggleStateMachine::new(
                i64::try_from(settings.presentation.focus_debounce_ms).unwrap_or(i64::MAX),
            ),
            ReadinessPolicy::from_settings(&settings.presentation),
            surface.clone(),
            emitter,
            clock,
            ensure_hotkey.clone(),
        );

        Self {
            deps,
            settings,
            surface,
            coordinator,
            ensure_hotkey,
            tickers: Mutex::new(Vec::new()),
        }
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases { runtime: self }
    }

    pub fn coordinator(&self) -> &Arc<ToggleCoordinator> {
        &self.coordinator
    }

    pub fn surface(&self) -> &Arc<TauriSurface> {
        &self.surface
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register the hotkey, start capture and the periodic tickers. Must run
    /// inside the async runtime.
    pub async fn start_background(&self) {
        if let Err(err) = self.ensure_hotkey.execute().await {
            warn!(error = ?err, "Initial hotkey registration failed, will retry periodically");
        }

        if self.settings.capture.enabled {
            if let Err(err) = self.usecases().start_clipboard_watcher().execute().await {
                error!(error = %err, "Failed to start clipboard watcher");
            }
        } else {
            info!("Clipboard capture disabled in settings");
        }

        let scanner = Arc::new(self.usecases().scan_due_tasks());
        let scan_ticker = spawn_periodic(
            "due-task-scan",
            Duration::from_secs(self.settings.reminders.startup_delay_secs),
            Duration::from_secs(self.settings.reminders.scan_interval_secs),
            move || {
                let scanner = scanner.clone();
                async move { scanner.execute().await.map(|_| ()) }
            },
        );

        let hotkey_period = Duration::from_secs(self.settings.presentation.hotkey_check_interval_secs);
        let ensure_hotkey = self.ensure_hotkey.clone();
        let hotkey_ticker = spawn_periodic("hotkey-check", hotkey_period, hotkey_period, move || {
            let ensure_hotkey = ensure_hotkey.clone();
            async move { ensure_hotkey.execute().await.map(|_| ()) }
        });

        let mut tickers = self
            .tickers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        tickers.push(scan_ticker);
        tickers.push(hotkey_ticker);
        info!(tickers = tickers.len(), "Background tasks started");
    }
}

/// Use case accessor. Each call builds a fresh use case over the shared
/// dependencies.
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl UseCases<'_> {
    fn deps(&self) -> &AppDeps {
        &self.runtime.deps
    }

    pub fn list_clips(&self) -> ListClips {
        ListClips::new(self.deps().clip_repo.clone())
    }

    pub fn delete_clip(&self) -> DeleteClip {
        DeleteClip::new(self.deps().clip_repo.clone())
    }

    pub fn copy_to_clipboard(&self) -> CopyToClipboard {
        CopyToClipboard::new(
            self.deps().clip_repo.clone(),
            self.deps().system_clipboard.clone(),
            self.deps().capture_gate.clone(),
            WriteTiming::from_settings(&self.runtime.settings.capture),
        )
    }

    pub fn pin_clip(&self) -> PinClip {
        PinClip::new(self.deps().clip_repo.clone(), self.create_task())
    }

    pub fn create_task(&self) -> CreateTask {
        CreateTask::new(self.deps().task_repo.clone(), self.deps().clock.clone())
    }

    pub fn edit_task(&self) -> EditTask {
        EditTask::new(self.deps().task_repo.clone(), self.deps().clock.clone())
    }

    pub fn snooze_task(&self) -> SnoozeTask {
        SnoozeTask::new(self.deps().task_repo.clone(), self.deps().clock.clone())
    }

    pub fn complete_task(&self) -> CompleteTask {
        CompleteTask::new(self.deps().task_repo.clone())
    }

    pub fn delete_task(&self) -> DeleteTask {
        DeleteTask::new(self.deps().task_repo.clone())
    }

    pub fn list_tasks(&self) -> ListTasks {
        ListTasks::new(self.deps().task_repo.clone())
    }

    pub fn scan_due_tasks(&self) -> ScanDueTasks {
        ScanDueTasks::new(
            self.deps().task_repo.clone(),
            self.deps().notifier.clone(),
            self.deps().emitter.clone(),
            self.deps().clock.clone(),
            self.runtime.settings.reminders.notification_body_len,
        )
    }

    pub fn notification_activation(&self) -> HandleNotificationActivation {
        HandleNotificationActivation::new(
            self.runtime.coordinator.clone(),
            self.deps().emitter.clone(),
        )
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.deps().settings.clone())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.deps().settings.clone())
    }

    pub fn start_clipboard_watcher(&self) -> StartClipboardWatcher {
        StartClipboardWatcher::new(self.deps().watcher_control.clone())
    }

    pub fn stop_clipboard_watcher(&self) -> StopClipboardWatcher {
        StopClipboardWatcher::new(self.deps().watcher_control.clone())
    }
}
