//! Toggle coordinator integration tests
//! 弹窗切换协调器集成测试

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use cn_app::usecases::presentation::{
    EnsureHotkeyRegistered, HandleNotificationActivation, ReadinessPolicy, ToggleCoordinator,
};
use cn_core::ids::TaskId;
use cn_core::presentation::{TogglePhase, ToggleStateMachine};

use support::{FakeHotkey, FakeSurface, ManualClock, RecordingEmitter};

const ACCELERATOR: &str = "CmdOrCtrl+Shift+V";

struct Harness {
    coordinator: Arc<ToggleCoordinator>,
    surface: Arc<FakeSurface>,
    emitter: Arc<RecordingEmitter>,
    hotkey: Arc<FakeHotkey>,
    clock: Arc<ManualClock>,
}

fn harness(content_ready: bool) -> Harness {
    let surface = Arc::new(FakeSurface::default());
    surface.ready.store(content_ready, Ordering::SeqCst);
    let emitter = Arc::new(RecordingEmitter::default());
    let hotkey = Arc::new(FakeHotkey::default());
    let clock = ManualClock::at_ms(1_000_000);

    let coordinator = ToggleCoordinator::new(
        ToggleStateMachine::new(200),
        ReadinessPolicy {
            first_backoff: Duration::from_millis(30),
            backoff: Duration::from_millis(100),
            max_attempts: 3,
        },
        surface.clone(),
        emitter.clone(),
        clock.clone(),
        Arc::new(EnsureHotkeyRegistered::new(hotkey.clone(), ACCELERATOR)),
    );

    Harness {
        coordinator,
        surface,
        emitter,
        hotkey,
        clock,
    }
}

/// Let the spawned readiness wait run to completion on the paused clock.
async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

#[tokio::test(start_paused = true)]
async fn test_hotkey_shows_surface_once_content_is_ready() {
    let h = harness(true);

    h.coordinator.hotkey_pressed().await.unwrap();
    settle().await;

    assert_eq!(h.coordinator.phase().await, TogglePhase::Visible);
    assert_eq!(h.surface.calls(), vec!["show", "focus"]);
    assert_eq!(h.emitter.names(), vec!["surface-shown"]);
    assert_eq!(h.hotkey.registered.lock().unwrap().clone(), vec![ACCELERATOR]);
}

#[tokio::test(start_paused = true)]
async fn test_second_press_hides_visible_surface() {
    let h = harness(true);

    h.coordinator.hotkey_pressed().await.unwrap();
    settle().await;
    h.clock.advance_ms(1_000);
    h.coordinator.hotkey_pressed().await.unwrap();

    assert_eq!(h.coordinator.phase().await, TogglePhase::Hidden);
    assert_eq!(h.surface.calls(), vec!["show", "focus", "hide", "reset"]);
    assert_eq!(h.emitter.names(), vec!["surface-shown", "surface-hidden"]);
}

#[tokio::test(start_paused = true)]
async fn test_press_during_readiness_wait_cancels_show() {
    let h = harness(false);

    h.coordinator.hotkey_pressed().await.unwrap();
    assert!(matches!(
        h.coordinator.phase().await,
        TogglePhase::Showing { .. }
    ));
    h.coordinator.hotkey_pressed().await.unwrap();

    // content turning ready later must not resurrect the cancelled show
    h.surface.ready.store(true, Ordering::SeqCst);
    settle().await;

    assert_eq!(h.coordinator.phase().await, TogglePhase::Hidden);
    assert!(!h.surface.calls().contains(&"show"));
    assert_eq!(h.emitter.names(), vec!["surface-hidden"]);
}

#[tokio::test(start_paused = true)]
async fn test_readiness_timeout_still_shows_surface() {
    let h = harness(false);

    h.coordinator.hotkey_pressed().await.unwrap();
    settle().await;

    assert_eq!(h.coordinator.phase().await, TogglePhase::Visible);
    assert_eq!(h.surface.probes.load(Ordering::SeqCst), 3);
    assert_eq!(h.surface.calls(), vec!["show", "focus"]);
}

#[tokio::test(start_paused = true)]
async fn test_readiness_timeout_does_not_wait_after_last_probe() {
    let h = harness(false);

    h.coordinator.hotkey_pressed().await.unwrap();
    // probes at 0 ms, 30 ms and 130 ms; the last failure times out at once
    tokio::time::sleep(Duration::from_millis(129)).await;
    assert!(matches!(
        h.coordinator.phase().await,
        TogglePhase::Showing { .. }
    ));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(h.coordinator.phase().await, TogglePhase::Visible);
    assert_eq!(h.surface.probes.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_focus_loss_right_after_show_is_ignored() {
    let h = harness(true);

    h.coordinator.hotkey_pressed().await.unwrap();
    settle().await;

    h.clock.advance_ms(50);
    h.coordinator.focus_lost().await.unwrap();
    assert_eq!(h.coordinator.phase().await, TogglePhase::Visible);

    h.clock.advance_ms(450);
    h.coordinator.focus_lost().await.unwrap();
    assert_eq!(h.coordinator.phase().await, TogglePhase::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_show_request_on_visible_surface_only_refocuses() {
    let h = harness(true);

    h.coordinator.hotkey_pressed().await.unwrap();
    settle().await;
    h.coordinator.show_requested().await.unwrap();

    assert_eq!(h.coordinator.phase().await, TogglePhase::Visible);
    assert_eq!(h.surface.calls(), vec!["show", "focus", "focus"]);
}

#[tokio::test(start_paused = true)]
async fn test_notification_activation_shows_surface_and_emits_task() {
    let h = harness(true);
    let activation = HandleNotificationActivation::new(h.coordinator.clone(), h.emitter.clone());

    activation.execute(TaskId::from("task-1")).await.unwrap();
    settle().await;

    assert_eq!(h.coordinator.phase().await, TogglePhase::Visible);
    let names = h.emitter.names();
    assert!(names.contains(&"task-activated"));
    assert!(names.contains(&"surface-shown"));
}

#[tokio::test(start_paused = true)]
async fn test_existing_hotkey_registration_is_left_alone() {
    let h = harness(true);
    h.hotkey
        .registered
        .lock()
        .unwrap()
        .push(ACCELERATOR.to_string());

    h.coordinator.hotkey_pressed().await.unwrap();
    settle().await;

    assert_eq!(h.hotkey.registered.lock().unwrap().len(), 1);
}
