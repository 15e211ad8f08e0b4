use std::collections::{BTreeSet, HashSet};
use std::mem;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info_span, warn, Instrument};

use hq_core::{Accelerator, MenuItem, ShortcutBinding};

use super::registry::{OwnerId, ShortcutRegistry};

/// Result of re-synchronising a scope with a menu's item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<Accelerator>,
    pub kept: Vec<Accelerator>,
    pub removed: Vec<Accelerator>,
    pub failed: Vec<Accelerator>,
}

/// The shortcuts held by one menu.
///
/// The set of held keys survives re-synchronisation with a new item list, so
/// a key is never registered twice on behalf of the same menu. A key that
/// moves to another item is rebound to that item's action. Everything still
/// held is returned to the registry on [`release`] or on drop.
///
/// [`release`]: ShortcutScope::release
pub struct ShortcutScope {
    name: String,
    owner: OwnerId,
    registry: Arc<ShortcutRegistry>,
    held: Mutex<BTreeSet<Accelerator>>,
}

impl ShortcutScope {
    pub fn new(registry: Arc<ShortcutRegistry>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: registry.new_owner(),
            registry,
            held: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `binding` unless this scope already holds its key.
    ///
    /// Returns `true` when the call took a new reference. Host failures are
    /// logged and leave the key unheld, so a later call retries it.
    pub async fn register(&self, binding: &ShortcutBinding) -> bool {
        let mut held = self.held.lock().await;
        self.register_locked(&mut held, binding).await
    }

    async fn register_locked(
        &self,
        held: &mut BTreeSet<Accelerator>,
        binding: &ShortcutBinding,
    ) -> bool {
        if held.contains(&binding.key) {
            return false;
        }
        match self.registry.acquire(self.owner, binding).await {
            Ok(_) => {
                held.insert(binding.key.clone());
                true
            }
            Err(err) => {
                warn!(scope = %self.name, error = %err, "shortcut registration failed");
                false
            }
        }
    }

    /// Bring the held keys in line with `items`.
    ///
    /// Keys no longer declared are released and newly declared keys are
    /// registered in item order. Keys already held are rebound to the action
    /// of the item declaring them now. Within one list only the first binding
    /// for a key counts.
    pub async fn sync(&self, items: &[MenuItem]) -> SyncReport {
        let span = info_span!("usecase.shortcuts.sync", scope = %self.name, items = items.len());
        async {
            let mut held = self.held.lock().await;
            let mut report = SyncReport::default();

            let mut seen = HashSet::new();
            let declared: Vec<&ShortcutBinding> = items
                .iter()
                .filter_map(|item| item.shortcut.as_ref())
                .filter(|binding| seen.insert(binding.key.clone()))
                .collect();

            let stale: Vec<Accelerator> = held
                .iter()
                .filter(|key| !seen.contains(*key))
                .cloned()
                .collect();
            for key in stale {
                held.remove(&key);
                self.registry.release(self.owner, &key).await;
                report.removed.push(key);
            }

            for binding in declared {
                if held.contains(&binding.key) {
                    if let Err(err) = self.registry.acquire(self.owner, binding).await {
                        warn!(scope = %self.name, error = %err, "shortcut rebind failed");
                    }
                    report.kept.push(binding.key.clone());
                } else if self.register_locked(&mut held, binding).await {
                    report.added.push(binding.key.clone());
                } else {
                    report.failed.push(binding.key.clone());
                }
            }

            debug!(?report, "shortcut scope synchronised");
            report
        }
        .instrument(span)
        .await
    }

    /// Return every held key to the registry.
    pub async fn release(&self) {
        let keys = mem::take(&mut *self.held.lock().await);
        for key in keys {
            self.registry.release(self.owner, &key).await;
        }
    }

    pub async fn keys(&self) -> Vec<Accelerator> {
        self.held.lock().await.iter().cloned().collect()
    }
}

impl Drop for ShortcutScope {
    fn drop(&mut self) {
        let keys = mem::take(self.held.get_mut());
        if keys.is_empty() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let registry = self.registry.clone();
                let owner = self.owner;
                handle.spawn(async move {
                    for key in keys {
                        registry.release(owner, &key).await;
                    }
                });
            }
            Err(_) => warn!(
                scope = %self.name,
                held = keys.len(),
                "shortcut scope dropped outside a runtime, host bindings leaked"
            ),
        }
    }
}
