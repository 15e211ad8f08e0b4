use anyhow::Result;
use tauri::{AppHandle, Runtime};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use hq_core::ports::GlobalShortcutPort;
use hq_core::{Accelerator, HostPlatform, ShortcutAction};

/// Global shortcuts through `tauri-plugin-global-shortcut`.
///
/// The plugin must be registered on the builder before this adapter is used.
pub struct TauriGlobalShortcut<R: Runtime> {
    app: AppHandle<R>,
    platform: HostPlatform,
}

impl<R: Runtime> TauriGlobalShortcut<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            platform: HostPlatform::current(),
        }
    }
}

#[async_trait::async_trait]
impl<R: Runtime> GlobalShortcutPort for TauriGlobalShortcut<R> {
    async fn register(&self, accelerator: &Accelerator, action: ShortcutAction) -> Result<()> {
        self.app
            .global_shortcut()
            .on_shortcut(accelerator.host_form(), move |_app, _shortcut, event| {
                if event.state == ShortcutState::Pressed {
                    action();
                }
            })?;
        Ok(())
    }

    async fn unregister(&self, accelerator: &Accelerator) -> Result<()> {
        self.app.global_shortcut().unregister(accelerator.host_form())?;
        Ok(())
    }

    async fn display_label(&self, accelerator: &Accelerator) -> Result<String> {
        Ok(accelerator.display_label(self.platform))
    }
}
