//! HQ Launcher
//!
//! Desktop shell: custom titlebar, global shortcuts and the update dialog.

use hq_tauri::bootstrap::{load_config_or_default, resolve_config_path, run_app};

pub fn run() {
    if let Err(err) = hq_tauri::bootstrap::tracing::init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let config = load_config_or_default(resolve_config_path().as_deref());

    if let Err(err) = run_app(tauri::generate_context!(), config) {
        tracing::error!(error = %format!("{err:#}"), "application failed to start");
        std::process::exit(1);
    }
}
