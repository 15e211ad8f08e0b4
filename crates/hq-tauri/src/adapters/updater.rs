use std::convert::Infallible;
use std::time::Duration;

use tauri::{AppHandle, Runtime};
use tauri_plugin_updater::{Update, UpdaterExt};
use tracing::{info, warn};

use hq_core::ports::{InstallProgressSink, UpdaterPort};
use hq_core::update::{InstallProgress, ProgressTracker};
use hq_core::UpdaterError;

/// Updater through `tauri-plugin-updater`.
///
/// Discovering updates is not this adapter's job: the dialog is opened with
/// an [`UpdateInfo`] obtained elsewhere. `install` resolves the matching
/// release from the endpoint, downloads and installs it, then restarts.
///
/// [`UpdateInfo`]: hq_core::UpdateInfo
pub struct TauriUpdater<R: Runtime> {
    app: AppHandle<R>,
    timeout: Option<Duration>,
}

impl<R: Runtime> TauriUpdater<R> {
    /// `timeout_secs == 0` keeps the plugin's default timeout.
    pub fn new(app: AppHandle<R>, timeout_secs: u64) -> Self {
        Self {
            app,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }

    async fn resolve_release(&self) -> Result<Update, UpdaterError> {
        let mut builder = self.app.updater_builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let updater = builder
            .build()
            .map_err(|err| UpdaterError::rejected(err.to_string()))?;
        updater
            .check()
            .await
            .map_err(|err| UpdaterError::rejected(err.to_string()))?
            .ok_or(UpdaterError::NoUpdateAvailable)
    }
}

#[async_trait::async_trait]
impl<R: Runtime> UpdaterPort for TauriUpdater<R> {
    async fn install(&self, progress: InstallProgressSink) -> Result<Infallible, UpdaterError> {
        let update = self.resolve_release().await?;
        info!(version = %update.version, "installing update");

        let mut tracker = ProgressTracker::new();
        let on_chunk = {
            let progress = progress.clone();
            move |chunk_length: usize, content_length: Option<u64>| {
                for event in tracker.on_chunk(chunk_length, content_length) {
                    progress(event);
                }
            }
        };
        let on_finish = move || progress(InstallProgress::Finished);

        if let Err(err) = update.download_and_install(on_chunk, on_finish).await {
            warn!(error = %err, version = %update.version, "download and install failed");
            return Err(UpdaterError::rejected(err.to_string()));
        }

        info!(version = %update.version, "update installed, restarting");
        self.app.restart()
    }
}
