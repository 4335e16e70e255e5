//! Presentation surface domain.

pub mod toggle;

pub use toggle::{
    TogglePhase, ToggleAction, ToggleEvent, ToggleState, ToggleStateMachine,
    DEFAULT_FOCUS_DEBOUNCE_MS,
};
