//! ClipNest Application Orchestration Layer
//!
//! This crate contains the use cases that drive the domain through ports:
//! clip capture and write-back, the due-task scanner, task lifecycle
//! commands, the presentation toggle coordinator and settings.

pub mod deps;
pub mod usecases;

pub use deps::AppDeps;
