//! HQ Launcher Application Orchestration Layer
//!
//! Use cases driving the titlebar (window chrome, menus, global shortcuts)
//! and the update dialog over the ports defined in `hq-core`.

pub mod usecases;

pub use usecases::{
    ShortcutLabelCache, ShortcutRegistry, ShortcutScope, Titlebar, UpdateInstaller,
    WindowChromeController,
};
