//! Titlebar composition root.
//!
//! Ties the window chrome controller to the titlebar menus. Each menu owns
//! one [`ShortcutScope`]; all scopes share the process-wide registry and the
//! label cache.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use hq_core::{Accelerator, MenuItem, WindowState};

use super::shortcuts::{ShortcutLabelCache, ShortcutRegistry, ShortcutScope, SyncReport};
use super::window_chrome::WindowChromeController;

/// Render model of one menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    pub id: String,
    pub label: String,
    /// Canonical accelerator, if the item has one.
    pub shortcut: Option<String>,
    /// Host display label; `None` until resolved (render a placeholder).
    pub shortcut_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub id: String,
    pub items: Vec<MenuItemView>,
}

struct MenuSlot {
    id: String,
    items: Vec<MenuItem>,
    scope: ShortcutScope,
}

pub struct Titlebar {
    chrome: Arc<WindowChromeController>,
    registry: Arc<ShortcutRegistry>,
    labels: Arc<ShortcutLabelCache>,
    shortcuts_enabled: bool,
    menus: Mutex<Vec<MenuSlot>>,
}

impl Titlebar {
    pub fn new(
        chrome: Arc<WindowChromeController>,
        registry: Arc<ShortcutRegistry>,
        labels: Arc<ShortcutLabelCache>,
    ) -> Self {
        Self {
            chrome,
            registry,
            labels,
            shortcuts_enabled: true,
            menus: Mutex::new(Vec::new()),
        }
    }

    /// Keep menus and labels but never register anything with the host.
    pub fn with_shortcuts_enabled(mut self, enabled: bool) -> Self {
        self.shortcuts_enabled = enabled;
        self
    }

    pub fn chrome(&self) -> &Arc<WindowChromeController> {
        &self.chrome
    }

    pub fn labels(&self) -> &Arc<ShortcutLabelCache> {
        &self.labels
    }

    pub async fn mount(&self) -> WindowState {
        self.chrome.mount().await
    }

    /// Install or replace the items of `menu_id`.
    ///
    /// The menu's shortcuts are synchronised with the registry and their
    /// display labels are resolved in the background.
    pub async fn set_menu(&self, menu_id: &str, items: Vec<MenuItem>) -> SyncReport {
        let span = info_span!("usecase.titlebar.set_menu", menu_id, items = items.len());
        async {
            let mut menus = self.menus.lock().await;
            let index = match menus.iter().position(|slot| slot.id == menu_id) {
                Some(index) => index,
                None => {
                    menus.push(MenuSlot {
                        id: menu_id.to_string(),
                        items: Vec::new(),
                        scope: ShortcutScope::new(self.registry.clone(), menu_id),
                    });
                    menus.len() - 1
                }
            };

            let slot = &mut menus[index];
            let report = if self.shortcuts_enabled {
                slot.scope.sync(&items).await
            } else {
                SyncReport::default()
            };
            if !report.failed.is_empty() {
                warn!(failed = ?report.failed, "some menu shortcuts could not be registered");
            }

            let keys: Vec<Accelerator> = items
                .iter()
                .filter_map(|item| item.shortcut.as_ref())
                .map(|binding| binding.key.clone())
                .filter(|key| self.labels.label(key).is_none())
                .collect();
            if !keys.is_empty() {
                let labels = self.labels.clone();
                tokio::spawn(async move { labels.resolve_all(keys.iter()).await });
            }

            slot.items = items;
            debug!(?report, "menu updated");
            report
        }
        .instrument(span)
        .await
    }

    /// Drop `menu_id` and release its shortcuts.
    pub async fn remove_menu(&self, menu_id: &str) -> bool {
        let slot = {
            let mut menus = self.menus.lock().await;
            let Some(index) = menus.iter().position(|slot| slot.id == menu_id) else {
                return false;
            };
            menus.remove(index)
        };
        slot.scope.release().await;
        info!(menu_id, "menu removed");
        true
    }

    /// Menus in insertion order, items in display order.
    pub async fn menus(&self) -> Vec<MenuView> {
        self.menus
            .lock()
            .await
            .iter()
            .map(|slot| MenuView {
                id: slot.id.clone(),
                items: slot
                    .items
                    .iter()
                    .map(|item| {
                        let key = item.shortcut.as_ref().map(|binding| &binding.key);
                        MenuItemView {
                            id: item.id.clone(),
                            label: item.label.clone(),
                            shortcut: key.map(Accelerator::to_string),
                            shortcut_label: key.and_then(|key| self.labels.label(key)),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Run the action of one menu item. Returns `false` for unknown ids.
    pub async fn activate(&self, menu_id: &str, item_id: &str) -> bool {
        let action = {
            let menus = self.menus.lock().await;
            menus
                .iter()
                .find(|slot| slot.id == menu_id)
                .and_then(|slot| slot.items.iter().find(|item| item.id == item_id))
                .map(|item| item.action.clone())
        };
        match action {
            Some(action) => {
                action();
                true
            }
            None => {
                debug!(menu_id, item_id, "activate for unknown menu item");
                false
            }
        }
    }

    /// Release the resize subscription and every menu's shortcuts.
    pub async fn unmount(&self) {
        self.chrome.unmount().await;
        let slots: Vec<MenuSlot> = self.menus.lock().await.drain(..).collect();
        for slot in slots {
            slot.scope.release().await;
        }
        info!("titlebar unmounted");
    }
}
