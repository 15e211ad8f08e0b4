//! # hq-tauri
//!
//! Tauri integration layer for HQ Launcher.
//!
//! ## Modules
//!
//! - **adapters**: Tauri implementations of the window, shortcut and updater ports
//! - **events**: forwarding of shell state to the frontend
//! - **commands**: Tauri command handlers (window, menu, update)
//! - **runtime**: `ShellRuntime`, the wired use cases managed as Tauri state
//! - **bootstrap**: config loading, tracing and the app entry point

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod events;
pub mod runtime;

pub use runtime::ShellRuntime;
