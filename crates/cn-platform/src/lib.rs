//! # cn-platform
//!
//! Platform-specific implementations for ClipNest.
//!
//! This crate contains the adapters that touch the operating system: the
//! system clipboard, the polling watcher runtime, periodic tickers and the
//! per-user data directory.

pub mod app_dirs;
pub mod clipboard;
pub mod runtime;
