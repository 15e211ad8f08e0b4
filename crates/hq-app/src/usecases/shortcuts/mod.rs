//! Global shortcut use cases.
//!
//! - [`ShortcutRegistry`]: one per process, tracks the owners of each host registration.
//! - [`ShortcutScope`]: one per menu, de-duplicates what that menu holds.
//! - [`ShortcutLabelCache`]: memoised, asynchronously resolved display labels.

mod labels;
mod registry;
mod scope;

pub use labels::ShortcutLabelCache;
pub use registry::{Acquired, OwnerId, ShortcutError, ShortcutRegistry};
pub use scope::{ShortcutScope, SyncReport};
