// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracing::error;

fn main() {
    // 日志系统需在 Builder 创建之前初始化
    if let Err(err) = cn_tauri::bootstrap::tracing::init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    if let Err(err) = cn_tauri::bootstrap::run_app(tauri::generate_context!()) {
        error!(error = ?err, "ClipNest exited with an error");
        std::process::exit(1);
    }
}
