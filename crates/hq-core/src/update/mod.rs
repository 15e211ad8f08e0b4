//! Update installation domain module.

mod error;
mod info;
mod progress;
pub mod state_machine;
mod view;

pub use error::UpdaterError;
pub use info::UpdateInfo;
pub use progress::{InstallProgress, ProgressTracker};
pub use state_machine::{InstallAction, InstallEvent, InstallState, InstallStateMachine};
pub use view::{UpdateDialogView, INSTALLING_LABEL, INSTALL_LABEL, RETRY_LABEL};
