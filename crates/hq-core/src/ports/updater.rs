use std::convert::Infallible;
use std::sync::Arc;

use crate::update::{InstallProgress, UpdaterError};

/// Receives progress while the host updater downloads and installs.
pub type InstallProgressSink = Arc<dyn Fn(InstallProgress) + Send + Sync>;

/// Host updater.
///
/// The success type is [`Infallible`]: a successful install terminates or
/// restarts the calling process, so only failures are ever returned.
#[async_trait::async_trait]
pub trait UpdaterPort: Send + Sync {
    async fn install(&self, progress: InstallProgressSink) -> Result<Infallible, UpdaterError>;
}
