use std::fmt;
use std::sync::Arc;

use anyhow::Result;

/// Callback fired on host-originated resize notifications.
///
/// Carries no payload: the host notification does not include the new state,
/// so handlers must re-query.
pub type ResizeCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle to an active resize subscription.
///
/// The release function runs exactly once, either through [`release`] or
/// when the handle is dropped.
///
/// [`release`]: ResizeSubscription::release
pub struct ResizeSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ResizeSubscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Host window manager commands used by the titlebar.
///
/// `minimize`, `toggle_maximize` and `close` are fire-and-forget: they
/// resolve once the host accepted the command, never with the resulting
/// window state.
#[async_trait::async_trait]
pub trait WindowHostPort: Send + Sync {
    async fn is_maximized(&self) -> Result<bool>;
    async fn subscribe_resize(&self, callback: ResizeCallback) -> Result<ResizeSubscription>;
    async fn minimize(&self) -> Result<()>;
    async fn toggle_maximize(&self) -> Result<()>;
    async fn close(&self) -> Result<()>;
}
