//! Titlebar window-control commands

use std::sync::Arc;

use tauri::State;
use tracing::{info_span, Instrument};

use hq_core::WindowState;

use crate::runtime::ShellRuntime;

#[tauri::command]
pub async fn get_window_state(
    runtime: State<'_, Arc<ShellRuntime>>,
) -> Result<WindowState, String> {
    Ok(runtime.usecases().chrome().state())
}

#[tauri::command]
pub async fn minimize_window(runtime: State<'_, Arc<ShellRuntime>>) -> Result<(), String> {
    let span = info_span!("command.window.minimize");
    async {
        runtime.usecases().chrome().minimize().await;
        Ok(())
    }
    .instrument(span)
    .await
}

/// Returns the optimistic state; the authoritative one follows on
/// `window://state-changed`.
#[tauri::command]
pub async fn toggle_maximize_window(
    runtime: State<'_, Arc<ShellRuntime>>,
) -> Result<WindowState, String> {
    let span = info_span!("command.window.toggle_maximize");
    async { Ok(runtime.usecases().chrome().toggle_maximize().await) }
        .instrument(span)
        .await
}

#[tauri::command]
pub async fn close_window(runtime: State<'_, Arc<ShellRuntime>>) -> Result<(), String> {
    let span = info_span!("command.window.close");
    async {
        runtime.usecases().chrome().close().await;
        Ok(())
    }
    .instrument(span)
    .await
}
