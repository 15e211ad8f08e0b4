//! Window chrome controller.
//!
//! Owns the titlebar's `is_maximized` view of the host window and forwards
//! minimize / maximize / close intents to the host.
//!
//! ## Consistency
//!
//! The local flag is eventually consistent with the host:
//! - `toggle_maximize` flips it optimistically, before the host confirms.
//! - Every resize notification triggers an authoritative re-query whose
//!   answer overwrites any optimistic value.
//! - Query results are tagged with a generation number; a result that
//!   resolves after a newer query or optimistic write was issued is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use hq_core::ports::{ResizeCallback, ResizeSubscription, WindowHostPort, WindowStateEmitter};
use hq_core::WindowState;

struct ChromeState {
    window: WindowState,
    /// Bumped by every query and every optimistic write.
    generation: u64,
}

struct ChromeShared {
    host: Arc<dyn WindowHostPort>,
    emitter: Arc<dyn WindowStateEmitter>,
    state: Mutex<ChromeState>,
    watch_tx: watch::Sender<WindowState>,
}

impl ChromeShared {
    fn lock(&self) -> MutexGuard<'_, ChromeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(&self) -> WindowState {
        self.lock().window
    }

    /// Re-query the host and apply the answer unless a newer write happened.
    ///
    /// A failed query leaves the last-known value in place.
    async fn refresh(&self) -> WindowState {
        let generation = {
            let mut guard = self.lock();
            guard.generation += 1;
            guard.generation
        };

        match self.host.is_maximized().await {
            Ok(is_maximized) => self.apply_query(generation, WindowState::new(is_maximized)),
            Err(err) => {
                warn!(error = %err, "window state query failed, keeping last known state");
                self.current()
            }
        }
    }

    fn apply_query(&self, generation: u64, next: WindowState) -> WindowState {
        let mut guard = self.lock();
        if guard.generation != generation {
            debug!(
                generation,
                latest = guard.generation,
                "discarding stale window state query result"
            );
            return guard.window;
        }
        if guard.window != next {
            guard.window = next;
            self.publish(next);
        }
        next
    }

    fn flip_optimistic(&self) -> WindowState {
        let mut guard = self.lock();
        guard.generation += 1;
        guard.window = guard.window.toggled();
        let next = guard.window;
        self.publish(next);
        next
    }

    /// Must be called with the state lock held so publications keep write order.
    fn publish(&self, state: WindowState) {
        self.watch_tx.send_replace(state);
        if let Err(err) = self.emitter.emit_window_state(state) {
            warn!(error = %err, "failed to emit window state");
        }
    }
}

struct ChromeSession {
    subscription: Option<ResizeSubscription>,
    reconciler: JoinHandle<()>,
}

impl ChromeSession {
    fn close(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        self.reconciler.abort();
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Dropping `subscription` releases it.
        self.reconciler.abort();
    }
}

/// Controller behind the titlebar's minimize / maximize / close buttons.
pub struct WindowChromeController {
    shared: Arc<ChromeShared>,
    session: AsyncMutex<Option<ChromeSession>>,
}

impl WindowChromeController {
    pub fn new(host: Arc<dyn WindowHostPort>, emitter: Arc<dyn WindowStateEmitter>) -> Self {
        let (watch_tx, _) = watch::channel(WindowState::default());
        Self {
            shared: Arc::new(ChromeShared {
                host,
                emitter,
                state: Mutex::new(ChromeState {
                    window: WindowState::default(),
                    generation: 0,
                }),
                watch_tx,
            }),
            session: AsyncMutex::new(None),
        }
    }

    /// Subscribe to host resize notifications, then query the initial state.
    ///
    /// Subscribing first guarantees a resize that happens while the initial
    /// query is in flight still triggers a re-query. Mounting twice is a no-op.
    pub async fn mount(&self) -> WindowState {
        let span = info_span!("usecase.window_chrome.mount");
        async {
            let mut session = self.session.lock().await;
            if session.is_some() {
                debug!("window chrome already mounted");
                return self.shared.current();
            }

            let (tx, mut rx) = mpsc::unbounded_channel::<()>();
            let callback: ResizeCallback = Arc::new(move || {
                let _ = tx.send(());
            });

            let subscription = match self.shared.host.subscribe_resize(callback).await {
                Ok(subscription) => Some(subscription),
                Err(err) => {
                    warn!(error = %err, "failed to subscribe to window resize notifications");
                    None
                }
            };

            let shared = self.shared.clone();
            let reconciler = tokio::spawn(
                async move {
                    while rx.recv().await.is_some() {
                        // Coalesce a burst of notifications into one query.
                        while rx.try_recv().is_ok() {}
                        shared.refresh().await;
                    }
                    debug!("window resize reconciler stopped");
                }
                .instrument(info_span!("usecase.window_chrome.reconcile")),
            );

            *session = Some(ChromeSession {
                subscription,
                reconciler,
            });

            let state = self.shared.refresh().await;
            info!(is_maximized = state.is_maximized, "window chrome mounted");
            state
        }
        .instrument(span)
        .await
    }

    /// Release the resize subscription. Safe to call when not mounted.
    pub async fn unmount(&self) {
        if let Some(session) = self.session.lock().await.take() {
            session.close();
            info!("window chrome unmounted");
        }
    }

    pub async fn is_mounted(&self) -> bool {
        self.session.lock().await.is_some()
    }

    pub fn state(&self) -> WindowState {
        self.shared.current()
    }

    pub fn is_maximized(&self) -> bool {
        self.shared.current().is_maximized
    }

    /// Watch local state changes (optimistic and authoritative).
    pub fn subscribe(&self) -> watch::Receiver<WindowState> {
        self.shared.watch_tx.subscribe()
    }

    /// Authoritative re-query of the host.
    pub async fn refresh(&self) -> WindowState {
        self.shared.refresh().await
    }

    pub async fn minimize(&self) {
        if let Err(err) = self.shared.host.minimize().await {
            warn!(error = %err, "minimize command failed");
        }
    }

    /// Flip the local flag immediately, then ask the host to toggle.
    ///
    /// When the host rejects the command the flag is reconciled by an
    /// immediate re-query.
    pub async fn toggle_maximize(&self) -> WindowState {
        let optimistic = self.shared.flip_optimistic();
        debug!(is_maximized = optimistic.is_maximized, "optimistic maximize toggle");
        match self.shared.host.toggle_maximize().await {
            Ok(()) => self.shared.current(),
            Err(err) => {
                warn!(error = %err, "toggle maximize command failed, re-querying host");
                self.shared.refresh().await
            }
        }
    }

    /// Ask the host to close the window. A successful close terminates the
    /// process, so nothing is awaited beyond the command itself.
    pub async fn close(&self) {
        info!("close requested");
        if let Err(err) = self.shared.host.close().await {
            warn!(error = %err, "close command failed");
        }
    }
}
