//! Tauri command handlers.
//! Tauri 命令处理器。

pub mod clips;
pub mod error;
pub mod settings;
pub mod surface;
pub mod tasks;

pub use error::map_err;
