//! # hq-core
//!
//! Core domain models and ports for the HQ Launcher window shell.
//!
//! This crate contains pure logic without any host runtime dependencies:
//! window state, accelerators and menu bindings, the update installation
//! state machine, and the port traits the use cases drive.

pub mod config;
pub mod ports;
pub mod shortcut;
pub mod update;
pub mod window;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use shortcut::{
    Accelerator, AcceleratorError, HostPlatform, MenuItem, ShortcutAction, ShortcutBinding,
};
pub use update::{InstallProgress, InstallState, UpdateDialogView, UpdateInfo, UpdaterError};
pub use window::WindowState;
