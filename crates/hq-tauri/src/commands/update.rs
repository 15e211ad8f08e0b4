//! Update dialog commands

use std::sync::Arc;

use tauri::State;
use tracing::{info_span, Instrument};

use hq_app::usecases::update::InstallerError;
use hq_core::{InstallState, UpdateDialogView, UpdateInfo};

use crate::commands::map_err;
use crate::runtime::ShellRuntime;

/// Open the dialog for a known update. Any previous session is replaced
/// and the new one starts in `Idle`.
#[tauri::command]
pub async fn open_update_dialog(
    runtime: State<'_, Arc<ShellRuntime>>,
    info: UpdateInfo,
) -> Result<UpdateDialogView, String> {
    let span = info_span!("command.update.open", version = %info.version);
    async {
        let installer = runtime.usecases().installer();
        installer.open(info);
        installer
            .view()
            .ok_or_else(|| map_err(InstallerError::NoSession.into()))
    }
    .instrument(span)
    .await
}

#[tauri::command]
pub async fn get_update_dialog(
    runtime: State<'_, Arc<ShellRuntime>>,
) -> Result<Option<UpdateDialogView>, String> {
    Ok(runtime.usecases().installer().view())
}

/// Install, or retry after a failure. Ignored while an install is running.
#[tauri::command]
pub async fn install_update(runtime: State<'_, Arc<ShellRuntime>>) -> Result<InstallState, String> {
    let span = info_span!("command.update.install");
    async {
        runtime
            .usecases()
            .installer()
            .install()
            .map_err(|err| map_err(err.into()))
    }
    .instrument(span)
    .await
}

/// "Later", escape or outside click. Returns `false` while installing.
#[tauri::command]
pub async fn dismiss_update_dialog(runtime: State<'_, Arc<ShellRuntime>>) -> Result<bool, String> {
    let span = info_span!("command.update.dismiss");
    async { Ok(runtime.usecases().installer().dismiss()) }
        .instrument(span)
        .await
}
