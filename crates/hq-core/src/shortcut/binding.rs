use std::fmt;
use std::sync::Arc;

use super::Accelerator;

/// Callback bound to a shortcut or menu entry.
pub type ShortcutAction = Arc<dyn Fn() + Send + Sync>;

/// A global shortcut and the action it triggers.
#[derive(Clone)]
pub struct ShortcutBinding {
    pub key: Accelerator,
    pub action: ShortcutAction,
}

impl ShortcutBinding {
    pub fn new(key: Accelerator, action: ShortcutAction) -> Self {
        Self { key, action }
    }

    pub fn trigger(&self) {
        (self.action)();
    }
}

impl fmt::Debug for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutBinding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// One entry of a titlebar menu. Menus are ordered sequences; the order is
/// display order.
#[derive(Clone)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub shortcut: Option<ShortcutBinding>,
    pub action: ShortcutAction,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: ShortcutAction) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shortcut: None,
            action,
        }
    }

    /// Attach a shortcut that triggers this item's own action.
    pub fn with_shortcut(mut self, key: Accelerator) -> Self {
        self.shortcut = Some(ShortcutBinding::new(key, self.action.clone()));
        self
    }

    pub fn activate(&self) {
        (self.action)();
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("shortcut", &self.shortcut)
            .finish_non_exhaustive()
    }
}
