use anyhow::Result;
use tauri::{AppHandle, Listener, Manager, Runtime, WebviewWindow};
use tracing::debug;

use hq_core::ports::{ResizeCallback, ResizeSubscription, WindowHostPort};

use super::HostError;

/// Host window event fired on every size change, including maximize and
/// restore.
pub const RESIZE_EVENT: &str = "tauri://resize";

/// Window manager commands for the window labelled `label`.
///
/// The window is looked up on every call, so the adapter can be built
/// before the window exists.
pub struct TauriWindowHost<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> TauriWindowHost<R> {
    pub fn new(app: AppHandle<R>, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }

    fn window(&self) -> Result<WebviewWindow<R>> {
        self.app
            .get_webview_window(&self.label)
            .ok_or_else(|| HostError::WindowNotFound(self.label.clone()).into())
    }
}

#[async_trait::async_trait]
impl<R: Runtime> WindowHostPort for TauriWindowHost<R> {
    async fn is_maximized(&self) -> Result<bool> {
        Ok(self.window()?.is_maximized()?)
    }

    async fn subscribe_resize(&self, callback: ResizeCallback) -> Result<ResizeSubscription> {
        let window = self.window()?;
        let id = window.listen(RESIZE_EVENT, move |_event| callback());
        debug!(label = %self.label, "listening for window resize");
        Ok(ResizeSubscription::new(move || window.unlisten(id)))
    }

    async fn minimize(&self) -> Result<()> {
        self.window()?.minimize()?;
        Ok(())
    }

    async fn toggle_maximize(&self) -> Result<()> {
        let window = self.window()?;
        if window.is_maximized()? {
            window.unmaximize()?;
        } else {
            window.maximize()?;
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.window()?.close()?;
        Ok(())
    }
}
