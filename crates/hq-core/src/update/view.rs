use serde::Serialize;

use super::{InstallProgress, InstallState, UpdateInfo};

/// Label of the primary dialog button for each state.
pub const INSTALL_LABEL: &str = "Install";
pub const INSTALLING_LABEL: &str = "Installing…";
pub const RETRY_LABEL: &str = "Retry";

/// Presentation model of the update dialog.
///
/// Everything here is derived from the session's `UpdateInfo` and
/// `InstallState`; the modal lock is `installing`, not a separate flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDialogView {
    pub session_id: u64,
    pub current_version: String,
    pub new_version: String,
    pub release_date: Option<String>,
    pub notes: Option<String>,
    pub state: InstallState,
    pub installing: bool,
    pub show_later: bool,
    pub dismissible: bool,
    pub error_banner: Option<String>,
    pub install_label: &'static str,
    pub install_enabled: bool,
    pub progress: Option<InstallProgress>,
}

impl UpdateDialogView {
    pub fn build(
        session_id: u64,
        info: &UpdateInfo,
        state: &InstallState,
        progress: Option<InstallProgress>,
    ) -> Self {
        let installing = state.is_installing();
        let install_label = match state {
            InstallState::Idle => INSTALL_LABEL,
            InstallState::Installing => INSTALLING_LABEL,
            InstallState::Failed { .. } => RETRY_LABEL,
        };

        Self {
            session_id,
            current_version: info.current_version.clone(),
            new_version: info.version.clone(),
            release_date: info.formatted_date(),
            notes: info.body.clone().filter(|body| !body.trim().is_empty()),
            state: state.clone(),
            installing,
            show_later: !installing,
            dismissible: !installing,
            error_banner: state.error_message().map(str::to_string),
            install_label,
            install_enabled: !installing,
            progress: if installing { progress } else { None },
        }
    }
}
