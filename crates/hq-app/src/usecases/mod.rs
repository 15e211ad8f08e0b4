pub mod shortcuts;
pub mod titlebar;
pub mod update;
pub mod window_chrome;

pub use shortcuts::{
    Acquired, OwnerId, ShortcutError, ShortcutLabelCache, ShortcutRegistry, ShortcutScope,
    SyncReport,
};
pub use titlebar::{MenuItemView, MenuView, Titlebar};
pub use update::{InstallerError, UpdateInstaller};
pub use window_chrome::WindowChromeController;
