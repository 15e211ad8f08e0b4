use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use hq_core::ports::GlobalShortcutPort;
use hq_core::Accelerator;

/// Memoised display labels for accelerators.
///
/// Labels come from the host and resolve asynchronously. Until a key has been
/// resolved [`label`] returns `None` and the caller renders a placeholder.
///
/// [`label`]: ShortcutLabelCache::label
pub struct ShortcutLabelCache {
    host: Arc<dyn GlobalShortcutPort>,
    labels: RwLock<HashMap<Accelerator, String>>,
}

impl ShortcutLabelCache {
    pub fn new(host: Arc<dyn GlobalShortcutPort>) -> Self {
        Self {
            host,
            labels: RwLock::new(HashMap::new()),
        }
    }

    pub fn label(&self, key: &Accelerator) -> Option<String> {
        self.labels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Resolve the label for `key`, asking the host at most once.
    ///
    /// A host failure memoises the canonical accelerator text instead.
    pub async fn resolve(&self, key: &Accelerator) -> String {
        if let Some(label) = self.label(key) {
            return label;
        }

        let label = match self.host.display_label(key).await {
            Ok(label) => label,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to resolve shortcut label");
                key.to_string()
            }
        };

        let mut labels = self.labels.write().unwrap_or_else(PoisonError::into_inner);
        // A concurrent resolve may have won; keep the first answer.
        let label = labels.entry(key.clone()).or_insert(label).clone();
        debug!(key = %key, label = %label, "shortcut label resolved");
        label
    }

    pub async fn resolve_all<'a>(&self, keys: impl IntoIterator<Item = &'a Accelerator>) {
        for key in keys {
            self.resolve(key).await;
        }
    }
}
