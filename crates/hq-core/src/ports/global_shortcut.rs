use anyhow::Result;

use crate::shortcut::{Accelerator, ShortcutAction};

/// Host global-shortcut service.
#[async_trait::async_trait]
pub trait GlobalShortcutPort: Send + Sync {
    /// Register `accelerator`; `action` is invoked whenever the host detects it.
    async fn register(&self, accelerator: &Accelerator, action: ShortcutAction) -> Result<()>;

    async fn unregister(&self, accelerator: &Accelerator) -> Result<()>;

    /// Human-readable label for `accelerator` on the host platform.
    async fn display_label(&self, accelerator: &Accelerator) -> Result<String>;
}
