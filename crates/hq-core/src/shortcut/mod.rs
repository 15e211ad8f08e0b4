//! Global shortcut domain types.

mod accelerator;
mod binding;
mod platform;

pub use accelerator::{Accelerator, AcceleratorError, Modifiers};
pub use binding::{MenuItem, ShortcutAction, ShortcutBinding};
pub use platform::HostPlatform;
