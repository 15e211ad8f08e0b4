use std::sync::Arc;

use tauri::{Manager, RunEvent, WebviewUrl, WebviewWindowBuilder};
use tracing::{info, info_span, Instrument};

use hq_core::AppConfig;

use crate::commands;
use crate::runtime::{window_label, ShellRuntime};

const WINDOW_TITLE: &str = "HQ Launcher";

/// Build and run the Tauri application.
///
/// `context` comes from `tauri::generate_context!()` in the binary crate,
/// which owns `tauri.conf.json`.
pub fn run_app(context: tauri::Context<tauri::Wry>, config: AppConfig) -> anyhow::Result<()> {
    let label = window_label(&config);

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_updater::Builder::new().build())
        .setup(move |app| {
            // The custom titlebar replaces native decorations on every platform.
            WebviewWindowBuilder::new(app, &label, WebviewUrl::default())
                .title(WINDOW_TITLE)
                .inner_size(1100.0, 720.0)
                .min_inner_size(800.0, 600.0)
                .decorations(false)
                .build()?;

            let runtime = Arc::new(ShellRuntime::new(app.handle(), config));
            app.manage(runtime.clone());

            tauri::async_runtime::spawn(
                async move {
                    runtime.usecases().titlebar().mount().await;
                }
                .instrument(info_span!("bootstrap.titlebar.mount")),
            );

            info!(window = %label, "shell runtime ready");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::window::get_window_state,
            commands::window::minimize_window,
            commands::window::toggle_maximize_window,
            commands::window::close_window,
            commands::menu::set_titlebar_menu,
            commands::menu::remove_titlebar_menu,
            commands::menu::get_titlebar_menus,
            commands::menu::activate_menu_item,
            commands::update::open_update_dialog,
            commands::update::get_update_dialog,
            commands::update::install_update,
            commands::update::dismiss_update_dialog,
        ])
        .build(context)?;

    app.run(|app_handle, event| {
        if let RunEvent::Exit = event {
            let Some(runtime) = app_handle.try_state::<Arc<ShellRuntime>>() else {
                return;
            };
            // Return every global shortcut to the OS before the process ends.
            tauri::async_runtime::block_on(runtime.usecases().titlebar().unmount());
            info!("shell runtime torn down");
        }
    });

    Ok(())
}
