//! Tauri application entry.
//! Tauri 应用入口。

use std::sync::Arc;

use tauri::{Builder, Manager, WebviewUrl, WebviewWindowBuilder, WindowEvent};
use tracing::{error, info, warn};

use super::wiring::{create_seed, AppRuntime, SURFACE_WINDOW_LABEL};
use crate::commands;

/// Build and run the Tauri application.
///
/// `context` comes from `tauri::generate_context!()` in the binary crate,
/// which owns `tauri.conf.json`.
pub fn run_app(context: tauri::Context<tauri::Wry>) -> anyhow::Result<()> {
    let seed = tauri::async_runtime::block_on(create_seed())?;
    info!(
        settings_path = %seed.loaded.app_dirs.settings_path().display(),
        "Runtime seed created"
    );

    Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_notification::init())
        .setup(move |app| {
            WebviewWindowBuilder::new(app, SURFACE_WINDOW_LABEL, WebviewUrl::default())
                .title("ClipNest")
                .inner_size(420.0, 560.0)
                .resizable(false)
                .decorations(false)
                .always_on_top(true)
                .skip_taskbar(true)
                .visible(false)
                .build()?;

            let runtime = Arc::new(AppRuntime::build(seed, app.handle()));
            app.manage(runtime.clone());

            tauri::async_runtime::spawn(async move {
                runtime.start_background().await;
            });
            Ok(())
        })
        .on_window_event(|window, event| {
            if window.label() != SURFACE_WINDOW_LABEL {
                return;
            }
            let Some(runtime) = window.try_state::<Arc<AppRuntime>>() else {
                return;
            };
            let coordinator = runtime.coordinator().clone();

            match event {
                WindowEvent::Focused(false) => {
                    tauri::async_runtime::spawn(async move {
                        if let Err(err) = coordinator.focus_lost().await {
                            warn!(error = ?err, "Focus-lost handling failed");
                        }
                    });
                }
                WindowEvent::CloseRequested { api, .. } => {
                    // the popup is only ever hidden; the app lives in the background
                    api.prevent_close();
                    if let Err(err) = window.hide() {
                        error!(error = %err, "Failed to hide surface on close");
                    }
                    tauri::async_runtime::spawn(async move {
                        if let Err(err) = coordinator.surface_hidden().await {
                            warn!(error = ?err, "Surface-hidden handling failed");
                        }
                    });
                }
                _ => {}
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::clips::list_clips,
            commands::clips::copy_clip,
            commands::clips::delete_clip,
            commands::clips::pin_clip,
            commands::clips::set_capture_enabled,
            commands::tasks::create_task,
            commands::tasks::edit_task,
            commands::tasks::snooze_task,
            commands::tasks::complete_task,
            commands::tasks::delete_task,
            commands::tasks::list_tasks,
            commands::settings::get_settings,
            commands::settings::update_settings,
            commands::surface::surface_ready,
            commands::surface::hide_surface,
            commands::surface::open_task,
        ])
        .run(context)?;

    Ok(())
}
