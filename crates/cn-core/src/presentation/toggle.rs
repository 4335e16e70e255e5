//! Presentation toggle state machine.
//!
//! Pure transition function for the single popup surface driven by the
//! global hotkey. Side effects are returned as [`ToggleAction`]s and carried
//! out by the app layer coordinator.
//!
//! 全局快捷键弹窗的纯状态机：只计算迁移与副作用，不执行副作用。

use serde::{Deserialize, Serialize};

/// Default window in which a focus-lost right after a toggle is ignored.
pub const DEFAULT_FOCUS_DEBOUNCE_MS: i64 = 200;

/// Surface phase.
///
/// 弹窗阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TogglePhase {
    /// Surface hidden, content reset.
    ///
    /// 已隐藏。
    Hidden,
    /// Waiting for the surface content to report readiness.
    ///
    /// 等待内容就绪。
    Showing { generation: u64 },
    /// Surface shown and focused.
    ///
    /// 已显示。
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub phase: TogglePhase,
    /// Millisecond timestamp of the last show/hide decision.
    pub last_toggle_at_ms: Option<i64>,
    next_generation: u64,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            phase: TogglePhase::Hidden,
            last_toggle_at_ms: None,
            next_generation: 1,
        }
    }
}

impl ToggleState {
    pub fn is_visible(&self) -> bool {
        self.phase == TogglePhase::Visible
    }

    fn with_phase(self, phase: TogglePhase) -> Self {
        Self { phase, ..self }
    }

    fn toggled(self, phase: TogglePhase, now_ms: i64) -> Self {
        Self {
            phase,
            last_toggle_at_ms: Some(now_ms),
            ..self
        }
    }

    fn begin_showing(self, now_ms: i64) -> (Self, u64) {
        let generation = self.next_generation;
        let state = Self {
            phase: TogglePhase::Showing { generation },
            last_toggle_at_ms: Some(now_ms),
            next_generation: generation.wrapping_add(1),
        };
        (state, generation)
    }
}

/// Inputs to the toggle machine.
///
/// 驱动弹窗状态机的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleEvent {
    /// Global hotkey pressed.
    HotkeyPressed { now_ms: i64 },
    /// Something other than the hotkey wants the surface up (tray, notification).
    ShowRequested { now_ms: i64 },
    /// The surface window lost focus.
    FocusLost { now_ms: i64 },
    /// Readiness wait for `generation` succeeded.
    ContentReady { generation: u64 },
    /// Readiness wait for `generation` ran out of attempts.
    ReadinessTimedOut { generation: u64 },
    /// The window was hidden or closed from outside the machine.
    SurfaceHidden,
}

/// Side effects produced by transitions, executed in order.
///
/// 状态迁移产生的副作用，按顺序执行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleAction {
    BeginReadinessWait { generation: u64 },
    CancelReadinessWait,
    ShowSurface,
    FocusSurface,
    HideSurface,
    ResetContent,
    EmitShown,
    EmitHidden,
    /// Re-register the global hotkey if it went missing.
    EnsureHotkey,
}

/// Pure toggle state machine.
///
/// 纯状态机：不包含副作用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleStateMachine {
    focus_debounce_ms: i64,
}

impl Default for ToggleStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_DEBOUNCE_MS)
    }
}

impl ToggleStateMachine {
    pub fn new(focus_debounce_ms: i64) -> Self {
        Self {
            focus_debounce_ms: focus_debounce_ms.max(0),
        }
    }

    pub fn focus_debounce_ms(&self) -> i64 {
        self.focus_debounce_ms
    }

    pub fn transition(
        &self,
        state: ToggleState,
        event: ToggleEvent,
    ) -> (ToggleState, Vec<ToggleAction>) {
        use ToggleAction as A;

        match (state.phase, event) {
            (TogglePhase::Hidden, ToggleEvent::HotkeyPressed { now_ms })
            | (TogglePhase::Hidden, ToggleEvent::ShowRequested { now_ms }) => {
                let (next, generation) = state.begin_showing(now_ms);
                (next, vec![A::BeginReadinessWait { generation }])
            }

            // second press while still waiting: the user changed their mind
            (TogglePhase::Showing { .. }, ToggleEvent::HotkeyPressed { now_ms }) => (
                state.toggled(TogglePhase::Hidden, now_ms),
                vec![A::CancelReadinessWait, A::HideSurface, A::ResetContent, A::EmitHidden],
            ),
            (TogglePhase::Showing { .. }, ToggleEvent::ShowRequested { .. }) => {
                (state, Vec::new())
            }

            (
                TogglePhase::Showing { generation },
                ToggleEvent::ContentReady { generation: ready },
            )
            | (
                TogglePhase::Showing { generation },
                ToggleEvent::ReadinessTimedOut { generation: ready },
            ) if generation == ready => (
                state.with_phase(TogglePhase::Visible),
                vec![A::ShowSurface, A::FocusSurface, A::EmitShown, A::EnsureHotkey],
            ),

            (TogglePhase::Visible, ToggleEvent::HotkeyPressed { now_ms }) => (
                state.toggled(TogglePhase::Hidden, now_ms),
                vec![A::HideSurface, A::ResetContent, A::EmitHidden],
            ),
            (TogglePhase::Visible, ToggleEvent::ShowRequested { now_ms }) => (
                state.toggled(TogglePhase::Visible, now_ms),
                vec![A::FocusSurface],
            ),
            (TogglePhase::Visible, ToggleEvent::FocusLost { now_ms }) => {
                if self.within_debounce(&state, now_ms) {
                    return (state, Vec::new());
                }
                (
                    state.toggled(TogglePhase::Hidden, now_ms),
                    vec![A::HideSurface, A::ResetContent, A::EmitHidden],
                )
            }

            (TogglePhase::Showing { .. }, ToggleEvent::SurfaceHidden) => (
                state.with_phase(TogglePhase::Hidden),
                vec![A::CancelReadinessWait, A::ResetContent, A::EmitHidden],
            ),
            (TogglePhase::Visible, ToggleEvent::SurfaceHidden) => (
                state.with_phase(TogglePhase::Hidden),
                vec![A::ResetContent, A::EmitHidden],
            ),

            // stale readiness results, focus noise while hidden/showing
            (_, _) => (state, Vec::new()),
        }
    }

    fn within_debounce(&self, state: &ToggleState, now_ms: i64) -> bool {
        state
            .last_toggle_at_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.focus_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ToggleStateMachine {
        ToggleStateMachine::default()
    }

    fn shown_at(now_ms: i64) -> ToggleState {
        let m = machine();
        let (state, actions) = m.transition(ToggleState::default(), ToggleEvent::HotkeyPressed { now_ms });
        let generation = match actions.as_slice() {
            [ToggleAction::BeginReadinessWait { generation }] => *generation,
            other => panic!("unexpected actions {other:?}"),
        };
        let (state, actions) = m.transition(state, ToggleEvent::ContentReady { generation });
        assert!(actions.contains(&ToggleAction::EmitShown));
        state
    }

    #[test]
    fn hotkey_from_hidden_waits_for_readiness() {
        let (state, actions) = machine().transition(
            ToggleState::default(),
            ToggleEvent::HotkeyPressed { now_ms: 1_000 },
        );
        assert_eq!(state.phase, TogglePhase::Showing { generation: 1 });
        assert_eq!(state.last_toggle_at_ms, Some(1_000));
        assert_eq!(actions, vec![ToggleAction::BeginReadinessWait { generation: 1 }]);
    }

    #[test]
    fn focus_lost_inside_debounce_is_ignored() {
        let state = shown_at(0);
        let (state, actions) = machine().transition(state, ToggleEvent::FocusLost { now_ms: 50 });
        assert!(state.is_visible());
        assert!(actions.is_empty());
    }

    #[test]
    fn focus_lost_after_debounce_hides() {
        let state = shown_at(0);
        let (state, actions) = machine().transition(state, ToggleEvent::FocusLost { now_ms: 500 });
        assert_eq!(state.phase, TogglePhase::Hidden);
        assert_eq!(
            actions,
            vec![
                ToggleAction::HideSurface,
                ToggleAction::ResetContent,
                ToggleAction::EmitHidden
            ]
        );
    }

    #[test]
    fn hotkey_while_showing_cancels_wait() {
        let m = machine();
        let (state, _) = m.transition(ToggleState::default(), ToggleEvent::HotkeyPressed { now_ms: 0 });
        let (state, actions) = m.transition(state, ToggleEvent::HotkeyPressed { now_ms: 20 });
        assert_eq!(state.phase, TogglePhase::Hidden);
        assert_eq!(actions[0], ToggleAction::CancelReadinessWait);
        assert!(actions.contains(&ToggleAction::ResetContent));

        // the cancelled wait reporting late must not resurrect the surface
        let (state, actions) = m.transition(state, ToggleEvent::ContentReady { generation: 1 });
        assert_eq!(state.phase, TogglePhase::Hidden);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_generation_is_ignored_while_showing_again() {
        let m = machine();
        let (state, _) = m.transition(ToggleState::default(), ToggleEvent::HotkeyPressed { now_ms: 0 });
        let (state, _) = m.transition(state, ToggleEvent::HotkeyPressed { now_ms: 10 });
        let (state, _) = m.transition(state, ToggleEvent::HotkeyPressed { now_ms: 20 });
        assert_eq!(state.phase, TogglePhase::Showing { generation: 2 });

        let (state, actions) = m.transition(state, ToggleEvent::ContentReady { generation: 1 });
        assert_eq!(state.phase, TogglePhase::Showing { generation: 2 });
        assert!(actions.is_empty());
    }

    #[test]
    fn duplicate_show_requests_do_not_restart_wait() {
        let m = machine();
        let (state, _) = m.transition(ToggleState::default(), ToggleEvent::ShowRequested { now_ms: 0 });
        let (same, actions) = m.transition(state.clone(), ToggleEvent::ShowRequested { now_ms: 5 });
        assert_eq!(same, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn hotkey_while_visible_hides() {
        let state = shown_at(0);
        let (state, actions) = machine().transition(state, ToggleEvent::HotkeyPressed { now_ms: 3_000 });
        assert_eq!(state.phase, TogglePhase::Hidden);
        assert_eq!(state.last_toggle_at_ms, Some(3_000));
        assert!(actions.contains(&ToggleAction::HideSurface));
    }

    #[test]
    fn readiness_timeout_still_shows() {
        let m = machine();
        let (state, _) = m.transition(ToggleState::default(), ToggleEvent::HotkeyPressed { now_ms: 0 });
        let (state, actions) = m.transition(state, ToggleEvent::ReadinessTimedOut { generation: 1 });
        assert!(state.is_visible());
        assert!(actions.contains(&ToggleAction::ShowSurface));
    }

    #[test]
    fn external_hide_resets_content_without_hiding_again() {
        let state = shown_at(0);
        let (state, actions) = machine().transition(state, ToggleEvent::SurfaceHidden);
        assert_eq!(state.phase, TogglePhase::Hidden);
        assert_eq!(actions, vec![ToggleAction::ResetContent, ToggleAction::EmitHidden]);
    }

    #[test]
    fn entering_visible_rearms_hotkey() {
        let m = machine();
        let (state, _) = m.transition(ToggleState::default(), ToggleEvent::HotkeyPressed { now_ms: 0 });
        let (_, actions) = m.transition(state, ToggleEvent::ContentReady { generation: 1 });
        assert_eq!(actions.last(), Some(&ToggleAction::EnsureHotkey));
    }
}
