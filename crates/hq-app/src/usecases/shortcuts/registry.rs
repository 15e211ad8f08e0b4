use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use hq_core::ports::GlobalShortcutPort;
use hq_core::{Accelerator, ShortcutAction, ShortcutBinding};

/// Errors produced while registering shortcuts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
    #[error("failed to register shortcut `{key}`: {message}")]
    Registration { key: String, message: String },
}

/// Outcome of a successful [`ShortcutRegistry::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    /// First owner; the key was registered with the host.
    Registered,
    /// Key already registered by another owner; this owner was queued behind it.
    Shared,
    /// This owner already held the key; its action was replaced.
    Rebound,
}

/// Identifies one holder of registry references, typically a menu scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

/// Owners of one host registration, oldest first.
#[derive(Default)]
struct Owners(StdMutex<Vec<(OwnerId, ShortcutAction)>>);

impl Owners {
    fn lock(&self) -> MutexGuard<'_, Vec<(OwnerId, ShortcutAction)>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(&self) {
        let action = self.lock().first().map(|(_, action)| action.clone());
        if let Some(action) = action {
            action();
        }
    }
}

struct Entry {
    /// Spelling handed to the host when the key was registered.
    registered: Accelerator,
    owners: Arc<Owners>,
}

/// Process-wide table of host-level shortcut registrations.
///
/// Each accelerator is registered with the host at most once, no matter how
/// many menus declare it. The host callback dispatches to the oldest owner
/// still holding the key, so when that owner leaves the key passes to the
/// next one without touching the host registration. The host registration
/// is dropped when the last owner goes away.
pub struct ShortcutRegistry {
    host: Arc<dyn GlobalShortcutPort>,
    entries: Mutex<HashMap<Accelerator, Entry>>,
    next_owner: AtomicU64,
}

impl ShortcutRegistry {
    pub fn new(host: Arc<dyn GlobalShortcutPort>) -> Self {
        Self {
            host,
            entries: Mutex::new(HashMap::new()),
            next_owner: AtomicU64::new(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn new_owner(&self) -> OwnerId {
        OwnerId(self.next_owner.fetch_add(1, Ordering::Relaxed))
    }

    /// Take `owner`'s reference on `binding.key`, registering it on 0 → 1.
    ///
    /// An owner holds at most one reference per key; acquiring again only
    /// replaces its action. The entry lock is held across the host call, so
    /// two owners racing on the same key cannot both reach the host.
    pub async fn acquire(
        &self,
        owner: OwnerId,
        binding: &ShortcutBinding,
    ) -> Result<Acquired, ShortcutError> {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(&binding.key) {
            let mut owners = entry.owners.lock();
            if let Some(slot) = owners.iter_mut().find(|(id, _)| *id == owner) {
                slot.1 = binding.action.clone();
                debug!(key = %binding.key, "shortcut action rebound");
                return Ok(Acquired::Rebound);
            }
            owners.push((owner, binding.action.clone()));
            debug!(key = %binding.key, refs = owners.len(), "shortcut already registered, sharing");
            return Ok(Acquired::Shared);
        }

        let owners = Arc::new(Owners::default());
        owners.lock().push((owner, binding.action.clone()));
        let dispatch: ShortcutAction = {
            let owners = owners.clone();
            Arc::new(move || owners.fire())
        };

        self.host
            .register(&binding.key, dispatch)
            .await
            .map_err(|err| ShortcutError::Registration {
                key: binding.key.to_string(),
                message: err.to_string(),
            })?;

        entries.insert(
            binding.key.clone(),
            Entry {
                registered: binding.key.clone(),
                owners,
            },
        );
        info!(key = %binding.key, "global shortcut registered");
        Ok(Acquired::Registered)
    }

    /// Return `owner`'s reference on `key`, unregistering it on 1 → 0.
    pub async fn release(&self, owner: OwnerId, key: &Accelerator) {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get(key) else {
            warn!(key = %key, "release of a shortcut that is not registered");
            return;
        };

        let remaining = {
            let mut owners = entry.owners.lock();
            let before = owners.len();
            owners.retain(|(id, _)| *id != owner);
            if owners.len() == before {
                warn!(key = %key, "release by an owner that does not hold the shortcut");
                return;
            }
            owners.len()
        };
        if remaining > 0 {
            debug!(key = %key, refs = remaining, "shortcut still in use");
            return;
        }

        let Some(entry) = entries.remove(key) else {
            return;
        };
        match self.host.unregister(&entry.registered).await {
            Ok(()) => info!(key = %entry.registered, "global shortcut unregistered"),
            Err(err) => warn!(
                key = %entry.registered,
                error = %err,
                "failed to unregister global shortcut"
            ),
        }
    }

    pub async fn ref_count(&self, key: &Accelerator) -> usize {
        self.entries
            .lock()
            .await
            .get(key)
            .map_or(0, |entry| entry.owners.lock().len())
    }

    /// Keys currently registered with the host, sorted.
    pub async fn registered_keys(&self) -> Vec<Accelerator> {
        let mut keys: Vec<Accelerator> = self
            .entries
            .lock()
            .await
            .values()
            .map(|entry| entry.registered.clone())
            .collect();
        keys.sort();
        keys
    }
}
