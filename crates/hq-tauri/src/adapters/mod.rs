//! Tauri implementations of the `hq-core` ports.
//!
//! Adapters hold an `AppHandle` and must only be constructed inside the
//! Tauri setup phase.

pub mod shortcut;
pub mod updater;
pub mod window;

pub use shortcut::TauriGlobalShortcut;
pub use updater::TauriUpdater;
pub use window::TauriWindowHost;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("window `{0}` not found")]
    WindowNotFound(String),
}
