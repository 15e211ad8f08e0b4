//! Titlebar menu commands
//!
//! Menus are declared by the frontend. Item actions are dispatched back to
//! it as `menu://action` events, whether triggered by click or by a global
//! shortcut.

use std::sync::Arc;

use serde::Deserialize;
use tauri::{AppHandle, Runtime, State};
use tracing::{info_span, warn, Instrument};

use hq_app::usecases::titlebar::MenuView;
use hq_core::{Accelerator, MenuItem, ShortcutAction};

use crate::events::{forward_menu_action, MenuActionEvent};
use crate::runtime::ShellRuntime;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDto {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub shortcut: Option<String>,
}

/// Turn frontend item declarations into menu items.
///
/// An unparsable accelerator is logged and the item is kept without one.
pub fn build_menu_items<R: Runtime>(
    app: &AppHandle<R>,
    menu_id: &str,
    items: Vec<MenuItemDto>,
) -> Vec<MenuItem> {
    items
        .into_iter()
        .map(|dto| {
            let action = menu_action(app.clone(), menu_id.to_string(), dto.id.clone());
            let item = MenuItem::new(dto.id, dto.label, action);
            match dto.shortcut.as_deref().map(Accelerator::parse) {
                Some(Ok(key)) => item.with_shortcut(key),
                Some(Err(err)) => {
                    warn!(menu_id, item_id = %item.id, error = %err, "ignoring invalid shortcut");
                    item
                }
                None => item,
            }
        })
        .collect()
}

fn menu_action<R: Runtime>(app: AppHandle<R>, menu_id: String, item_id: String) -> ShortcutAction {
    Arc::new(move || {
        let event = MenuActionEvent {
            menu_id: menu_id.clone(),
            item_id: item_id.clone(),
        };
        if let Err(err) = forward_menu_action(&app, event) {
            warn!(
                menu_id = %menu_id,
                item_id = %item_id,
                error = %err,
                "failed to emit menu action"
            );
        }
    })
}

#[tauri::command]
pub async fn set_titlebar_menu(
    app: AppHandle,
    runtime: State<'_, Arc<ShellRuntime>>,
    menu_id: String,
    items: Vec<MenuItemDto>,
) -> Result<Vec<MenuView>, String> {
    let span = info_span!("command.menu.set", menu_id = %menu_id);
    async {
        let titlebar = runtime.usecases().titlebar();
        let items = build_menu_items(&app, &menu_id, items);
        titlebar.set_menu(&menu_id, items).await;
        Ok(titlebar.menus().await)
    }
    .instrument(span)
    .await
}

#[tauri::command]
pub async fn remove_titlebar_menu(
    runtime: State<'_, Arc<ShellRuntime>>,
    menu_id: String,
) -> Result<bool, String> {
    let span = info_span!("command.menu.remove", menu_id = %menu_id);
    async { Ok(runtime.usecases().titlebar().remove_menu(&menu_id).await) }
        .instrument(span)
        .await
}

#[tauri::command]
pub async fn get_titlebar_menus(
    runtime: State<'_, Arc<ShellRuntime>>,
) -> Result<Vec<MenuView>, String> {
    Ok(runtime.usecases().titlebar().menus().await)
}

#[tauri::command]
pub async fn activate_menu_item(
    runtime: State<'_, Arc<ShellRuntime>>,
    menu_id: String,
    item_id: String,
) -> Result<bool, String> {
    let span = info_span!("command.menu.activate", menu_id = %menu_id, item_id = %item_id);
    async {
        Ok(runtime
            .usecases()
            .titlebar()
            .activate(&menu_id, &item_id)
            .await)
    }
    .instrument(span)
    .await
}
