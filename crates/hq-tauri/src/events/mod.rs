//! Event Forwarding - Forward shell state to the frontend

use anyhow::anyhow;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime};

use hq_core::ports::{InstallStateEmitter, WindowStateEmitter};
use hq_core::{InstallProgress, UpdateDialogView, WindowState};

pub const WINDOW_STATE_EVENT: &str = "window://state-changed";
pub const UPDATE_DIALOG_EVENT: &str = "update://dialog";
pub const UPDATE_PROGRESS_EVENT: &str = "update://progress";
pub const MENU_ACTION_EVENT: &str = "menu://action";

/// Progress of the install command of one dialog session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressEvent {
    pub session_id: u64,
    #[serde(flatten)]
    pub progress: InstallProgress,
}

/// A menu item was activated by click or global shortcut.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuActionEvent {
    pub menu_id: String,
    pub item_id: String,
}

/// Forward window state to frontend
pub fn forward_window_state<R: Runtime>(
    app: &AppHandle<R>,
    state: WindowState,
) -> Result<(), Box<dyn std::error::Error>> {
    app.emit(WINDOW_STATE_EVENT, state)?;
    Ok(())
}

/// Forward the update dialog; `None` closes it
pub fn forward_update_dialog<R: Runtime>(
    app: &AppHandle<R>,
    view: Option<&UpdateDialogView>,
) -> Result<(), Box<dyn std::error::Error>> {
    app.emit(UPDATE_DIALOG_EVENT, view)?;
    Ok(())
}

pub fn forward_update_progress<R: Runtime>(
    app: &AppHandle<R>,
    event: UpdateProgressEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    app.emit(UPDATE_PROGRESS_EVENT, event)?;
    Ok(())
}

pub fn forward_menu_action<R: Runtime>(
    app: &AppHandle<R>,
    event: MenuActionEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    app.emit(MENU_ACTION_EVENT, event)?;
    Ok(())
}

/// Emitter port implementation over the app-wide event bus.
pub struct TauriEventEmitter<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriEventEmitter<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> WindowStateEmitter for TauriEventEmitter<R> {
    fn emit_window_state(&self, state: WindowState) -> anyhow::Result<()> {
        forward_window_state(&self.app, state).map_err(|err| anyhow!("{err}"))
    }
}

impl<R: Runtime> InstallStateEmitter for TauriEventEmitter<R> {
    fn emit_dialog(&self, view: Option<&UpdateDialogView>) -> anyhow::Result<()> {
        forward_update_dialog(&self.app, view).map_err(|err| anyhow!("{err}"))
    }

    fn emit_progress(&self, session_id: u64, progress: InstallProgress) -> anyhow::Result<()> {
        forward_update_progress(
            &self.app,
            UpdateProgressEvent {
                session_id,
                progress,
            },
        )
        .map_err(|err| anyhow!("{err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri::Listener;

    fn capture<R: Runtime>(app: &AppHandle<R>, event: &str) -> tokio::sync::mpsc::Receiver<String> {
        let (tx, rx) = tokio::sync::mpsc::channel::<String>(4);
        app.listen(event.to_string(), move |event: tauri::Event| {
            let _ = tx.try_send(event.payload().to_string());
        });
        rx
    }

    #[test]
    fn progress_event_flattens_progress_fields() {
        let value = serde_json::to_value(UpdateProgressEvent {
            session_id: 3,
            progress: InstallProgress::Progress {
                downloaded: 10,
                total: Some(20),
            },
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sessionId": 3,
                "type": "progress",
                "downloaded": 10,
                "total": 20
            })
        );
    }

    #[tokio::test]
    async fn window_state_is_emitted_with_camel_case_payload() {
        let app = tauri::test::mock_app();
        let app_handle = app.handle();
        let mut rx = capture(app_handle, WINDOW_STATE_EVENT);

        TauriEventEmitter::new(app_handle.clone())
            .emit_window_state(WindowState::new(true))
            .expect("emit window state");

        let payload = rx.recv().await.expect("event payload");
        assert_eq!(payload, r#"{"isMaximized":true}"#);
    }

    #[tokio::test]
    async fn closed_dialog_is_emitted_as_null() {
        let app = tauri::test::mock_app();
        let app_handle = app.handle();
        let mut rx = capture(app_handle, UPDATE_DIALOG_EVENT);

        TauriEventEmitter::new(app_handle.clone())
            .emit_dialog(None)
            .expect("emit dialog close");

        let payload = rx.recv().await.expect("event payload");
        assert_eq!(payload, "null");
    }

    #[tokio::test]
    async fn forward_menu_action_emits_event() {
        let app = tauri::test::mock_app();
        let app_handle = app.handle();
        let mut rx = capture(app_handle, MENU_ACTION_EVENT);

        forward_menu_action(
            app_handle,
            MenuActionEvent {
                menu_id: "file".into(),
                item_id: "new".into(),
            },
        )
        .expect("emit menu action");

        let payload = rx.recv().await.expect("event payload");
        assert!(payload.contains(r#""menuId":"file""#));
        assert!(payload.contains(r#""itemId":"new""#));
    }
}
