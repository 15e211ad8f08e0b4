use anyhow::Result;

use crate::update::{InstallProgress, UpdateDialogView};
use crate::window::WindowState;

/// Pushes window state changes to the UI.
pub trait WindowStateEmitter: Send + Sync {
    fn emit_window_state(&self, state: WindowState) -> Result<()>;
}

/// Pushes update dialog changes to the UI.
pub trait InstallStateEmitter: Send + Sync {
    /// `view` is `None` when the dialog session closed.
    fn emit_dialog(&self, view: Option<&UpdateDialogView>) -> Result<()>;

    fn emit_progress(&self, session_id: u64, progress: InstallProgress) -> Result<()>;
}
