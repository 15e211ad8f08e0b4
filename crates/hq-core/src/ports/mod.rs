//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the host runtime
//! (window manager, global-shortcut service, updater, UI event bus).
//! Every host command the shell issues goes through one of these traits.

pub mod global_shortcut;
pub mod ui_events;
pub mod updater;
pub mod window_host;

pub use global_shortcut::GlobalShortcutPort;
pub use ui_events::{InstallStateEmitter, WindowStateEmitter};
pub use updater::{InstallProgressSink, UpdaterPort};
pub use window_host::{ResizeCallback, ResizeSubscription, WindowHostPort};
