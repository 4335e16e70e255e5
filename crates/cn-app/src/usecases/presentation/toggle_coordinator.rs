//! Drives the toggle state machine and executes its actions.
//!
//! 执行弹窗状态机产生的副作用。
//!
//! All events go through [`ToggleCoordinator::dispatch`], which holds the
//! state lock for the transition *and* its actions. Two hotkey presses can
//! therefore never interleave their show/hide effects. The readiness wait is
//! the only background piece; it is spawned per show attempt, tagged with a
//! generation, and aborted when the machine says so.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use cn_core::ports::{AppEvent, AppEventEmitterPort, ClockPort, SurfacePort};
use cn_core::presentation::{
    ToggleAction, ToggleEvent, TogglePhase, ToggleState, ToggleStateMachine,
};
use cn_core::settings::PresentationSettings;

use super::EnsureHotkeyRegistered;

/// Backoff schedule for polling surface readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub first_backoff: Duration,
    pub backoff: Duration,
    pub max_attempts: u32,
}

impl ReadinessPolicy {
    pub fn from_settings(settings: &PresentationSettings) -> Self {
        Self {
            first_backoff: Duration::from_millis(settings.readiness_first_backoff_ms),
            backoff: Duration::from_millis(settings.readiness_backoff_ms),
            max_attempts: settings.readiness_max_attempts.max(1),
        }
    }

    fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 1 {
            self.first_backoff
        } else {
            self.backoff
        }
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::from_settings(&PresentationSettings::default())
    }
}

pub struct ToggleCoordinator {
    machine: ToggleStateMachine,
    state: Mutex<ToggleState>,
    readiness_wait: std::sync::Mutex<Option<AbortHandle>>,
    readiness: ReadinessPolicy,
    surface: Arc<dyn SurfacePort>,
    emitter: Arc<dyn AppEventEmitterPort>,
    clock: Arc<dyn ClockPort>,
    ensure_hotkey: Arc<EnsureHotkeyRegistered>,
}

impl ToggleCoordinator {
    pub fn new(
        machine: ToggleStateMachine,
        readiness: ReadinessPolicy,
        surface: Arc<dyn SurfacePort>,
        emitter: Arc<dyn AppEventEmitterPort>,
        clock: Arc<dyn ClockPort>,
        ensure_hotkey: Arc<EnsureHotkeyRegistered>,
    ) -> Arc<Self> {
        Arc::new(Self {
            machine,
            state: Mutex::new(ToggleState::default()),
            readiness_wait: std::sync::Mutex::new(None),
            readiness,
            surface,
            emitter,
            clock,
            ensure_hotkey,
        })
    }

    pub async fn phase(&self) -> TogglePhase {
        self.state.lock().await.phase
    }

    pub async fn hotkey_pressed(self: &Arc<Self>) -> Result<()> {
        let now_ms = self.clock.now_ms();
        self.dispatch(ToggleEvent::HotkeyPressed { now_ms }).await
    }

    pub async fn show_requested(self: &Arc<Self>) -> Result<()> {
        let now_ms = self.clock.now_ms();
        self.dispatch(ToggleEvent::ShowRequested { now_ms }).await
    }

    pub async fn focus_lost(self: &Arc<Self>) -> Result<()> {
        let now_ms = self.clock.now_ms();
        self.dispatch(ToggleEvent::FocusLost { now_ms }).await
    }

    pub async fn surface_hidden(self: &Arc<Self>) -> Result<()> {
        self.dispatch(ToggleEvent::SurfaceHidden).await
    }

    /// Feed one event through the machine and run the resulting actions
    /// while still holding the state lock.
    pub async fn dispatch(self: &Arc<Self>, event: ToggleEvent) -> Result<()> {
        let span = info_span!("usecase.toggle_surface.dispatch", ?event);

        async {
            let mut state = self.state.lock().await;
            let (next, actions) = self.machine.transition(state.clone(), event);
            if next.phase != state.phase {
                debug!(from = ?state.phase, to = ?next.phase, "Toggle phase changed");
            }
            *state = next;

            for action in actions {
                if let Err(err) = self.run_action(action).await {
                    // keep going: a failed focus must not leave the surface half shown
                    warn!(?action, error = ?err, "Toggle action failed");
                }
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn run_action(self: &Arc<Self>, action: ToggleAction) -> Result<()> {
        match action {
            ToggleAction::BeginReadinessWait { generation } => {
                self.spawn_readiness_wait(generation);
            }
            ToggleAction::CancelReadinessWait => self.cancel_readiness_wait(),
            ToggleAction::ShowSurface => self.surface.show().await?,
            ToggleAction::FocusSurface => self.surface.focus().await?,
            ToggleAction::HideSurface => self.surface.hide().await?,
            ToggleAction::ResetContent => self.surface.reset_content().await?,
            ToggleAction::EmitShown => {
                info!("Surface shown");
                self.emitter.emit(AppEvent::SurfaceShown)?;
            }
            ToggleAction::EmitHidden => {
                info!("Surface hidden");
                self.emitter.emit(AppEvent::SurfaceHidden)?;
            }
            ToggleAction::EnsureHotkey => {
                self.ensure_hotkey.execute().await?;
            }
        }
        Ok(())
    }

    fn spawn_readiness_wait(self: &Arc<Self>, generation: u64) {
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let event = this.wait_for_readiness(generation).await;
            if let Err(err) = this.dispatch_boxed(event).await {
                warn!(generation, error = ?err, "Readiness result dispatch failed");
            }
        });

        let previous = self
            .readiness_wait
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_readiness_wait(&self) {
        let handle = self
            .readiness_wait
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("Readiness wait cancelled");
        }
    }

    fn dispatch_boxed(self: Arc<Self>, event: ToggleEvent) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move { self.dispatch(event).await })
    }

    async fn wait_for_readiness(&self, generation: u64) -> ToggleEvent {
        for attempt in 1..=self.readiness.max_attempts {
            match self.surface.is_content_ready().await {
                Ok(true) => {
                    debug!(generation, attempt, "Surface content ready");
                    return ToggleEvent::ContentReady { generation };
                }
                Ok(false) => {}
                Err(err) => debug!(generation, attempt, error = ?err, "Readiness probe failed"),
            }
            if attempt < self.readiness.max_attempts {
                tokio::time::sleep(self.readiness.delay_before(attempt)).await;
            }
        }

        warn!(
            generation,
            attempts = self.readiness.max_attempts,
            "Surface content not ready, showing anyway"
        );
        ToggleEvent::ReadinessTimedOut { generation }
    }
}
