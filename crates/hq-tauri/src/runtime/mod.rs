//! Shell runtime
//!
//! Holds the wired use cases and is managed by Tauri's state system.
//!
//! ```ignore
//! use std::sync::Arc;
//! use tauri::State;
//! use hq_tauri::runtime::ShellRuntime;
//!
//! #[tauri::command]
//! async fn my_command(runtime: State<'_, Arc<ShellRuntime>>) -> Result<(), String> {
//!     runtime.usecases().titlebar().chrome().minimize().await;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tauri::AppHandle;

use hq_app::{
    ShortcutLabelCache, ShortcutRegistry, Titlebar, UpdateInstaller, WindowChromeController,
};
use hq_core::ports::{GlobalShortcutPort, InstallStateEmitter, WindowStateEmitter};
use hq_core::AppConfig;

use crate::adapters::{TauriGlobalShortcut, TauriUpdater, TauriWindowHost};
use crate::events::TauriEventEmitter;

/// Window label used when the config leaves it empty.
pub const DEFAULT_WINDOW_LABEL: &str = "main";

pub struct ShellRuntime {
    config: Arc<AppConfig>,
    titlebar: Arc<Titlebar>,
    installer: Arc<UpdateInstaller>,
}

impl ShellRuntime {
    /// Wire adapters and use cases. Must run inside the Tauri setup phase.
    pub fn new(app: &AppHandle, config: AppConfig) -> Self {
        let label = window_label(&config);
        let emitter = Arc::new(TauriEventEmitter::new(app.clone()));

        let chrome = Arc::new(WindowChromeController::new(
            Arc::new(TauriWindowHost::new(app.clone(), label)),
            emitter.clone() as Arc<dyn WindowStateEmitter>,
        ));
        let shortcuts: Arc<dyn GlobalShortcutPort> =
            Arc::new(TauriGlobalShortcut::new(app.clone()));
        let titlebar = Titlebar::new(
            chrome,
            ShortcutRegistry::new(shortcuts.clone()).arc(),
            Arc::new(ShortcutLabelCache::new(shortcuts)),
        )
        .with_shortcuts_enabled(!config.shortcuts_disabled);

        let installer = UpdateInstaller::new(
            Arc::new(TauriUpdater::new(app.clone(), config.update_timeout_secs)),
            emitter as Arc<dyn InstallStateEmitter>,
        );

        Self {
            config: Arc::new(config),
            titlebar: Arc::new(titlebar),
            installer: Arc::new(installer),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

/// Accessor for the use cases behind commands.
pub struct UseCases<'a> {
    runtime: &'a ShellRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a ShellRuntime) -> Self {
        Self { runtime }
    }

    pub fn titlebar(&self) -> &'a Arc<Titlebar> {
        &self.runtime.titlebar
    }

    pub fn chrome(&self) -> &'a Arc<WindowChromeController> {
        self.runtime.titlebar.chrome()
    }

    pub fn installer(&self) -> &'a Arc<UpdateInstaller> {
        &self.runtime.installer
    }
}

/// Label of the window the titlebar controls.
pub fn window_label(config: &AppConfig) -> String {
    if config.window_label.trim().is_empty() {
        DEFAULT_WINDOW_LABEL.to_string()
    } else {
        config.window_label.clone()
    }
}
