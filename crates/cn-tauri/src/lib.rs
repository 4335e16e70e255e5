//! # cn-tauri
//!
//! Tauri integration layer for ClipNest.
//!
//! This crate provides:
//! - Bootstrap: tracing, settings load, wiring and the Tauri run loop
//! - Adapters for the window surface, global shortcut, notifications and
//!   frontend events
//! - Tauri command handlers
//!
//! ## Modules
//!
//! - **bootstrap**: startup sequence and [`bootstrap::AppRuntime`]
//! - **adapters**: `AppHandle`-backed port implementations
//! - **commands**: Tauri command handlers (clips, tasks, settings, surface)

pub mod adapters;
pub mod bootstrap;
pub mod commands;

pub use bootstrap::AppRuntime;
