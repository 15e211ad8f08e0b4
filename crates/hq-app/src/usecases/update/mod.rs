//! Update dialog installer.
//!
//! Drives one [`InstallStateMachine`] per dialog session. Each `open` starts a
//! new session with a fresh id; results of an install command issued for an
//! older session are discarded when they arrive.
//!
//! At most one host install command runs per process. An install requested
//! while an earlier session's command is still running takes that command
//! over instead of issuing a second one: its progress and failure are then
//! reported to the requesting session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use hq_core::ports::{InstallProgressSink, InstallStateEmitter, UpdaterPort};
use hq_core::update::state_machine::{InstallAction, InstallEvent, InstallStateMachine};
use hq_core::{InstallProgress, InstallState, UpdateDialogView, UpdateInfo};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InstallerError {
    #[error("no update dialog is open")]
    NoSession,
}

struct Session {
    id: u64,
    info: UpdateInfo,
    state: InstallState,
    progress: Option<InstallProgress>,
}

impl Session {
    fn view(&self) -> UpdateDialogView {
        UpdateDialogView::build(self.id, &self.info, &self.state, self.progress)
    }
}

struct InstallerShared {
    updater: Arc<dyn UpdaterPort>,
    emitter: Arc<dyn InstallStateEmitter>,
    session: Mutex<Option<Session>>,
    /// Session the running host command reports to; `None` when idle.
    in_flight: Mutex<Option<u64>>,
    next_session_id: AtomicU64,
    watch_tx: watch::Sender<InstallState>,
}

impl InstallerShared {
    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<u64>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `event` to session `session_id`, ignoring it if that session is gone.
    fn dispatch(&self, session_id: u64, event: InstallEvent) -> Vec<InstallAction> {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut().filter(|session| session.id == session_id) else {
            debug!(session_id, ?event, "dropping event for a closed update session");
            return Vec::new();
        };

        let (next, actions) = InstallStateMachine::transition(session.state.clone(), event);
        if next != session.state {
            if next.is_installing() {
                session.progress = None;
            }
            session.state = next;
            self.publish(session);
        }
        actions
    }

    fn record_progress(&self, progress: InstallProgress) {
        let Some(session_id) = *self.lock_in_flight() else {
            return;
        };
        let mut guard = self.lock();
        let Some(session) = guard
            .as_mut()
            .filter(|session| session.id == session_id && session.state.is_installing())
        else {
            return;
        };
        session.progress = Some(progress);
        if let Err(err) = self.emitter.emit_progress(session_id, progress) {
            warn!(error = %err, "failed to emit install progress");
        }
    }

    /// Must be called with the session lock held.
    fn publish(&self, session: &Session) {
        self.watch_tx.send_replace(session.state.clone());
        if let Err(err) = self.emitter.emit_dialog(Some(&session.view())) {
            warn!(error = %err, "failed to emit update dialog state");
        }
    }
}

/// Install flow behind the update dialog.
pub struct UpdateInstaller {
    shared: Arc<InstallerShared>,
}

impl UpdateInstaller {
    pub fn new(updater: Arc<dyn UpdaterPort>, emitter: Arc<dyn InstallStateEmitter>) -> Self {
        let (watch_tx, _) = watch::channel(InstallState::Idle);
        Self {
            shared: Arc::new(InstallerShared {
                updater,
                emitter,
                session: Mutex::new(None),
                in_flight: Mutex::new(None),
                next_session_id: AtomicU64::new(1),
                watch_tx,
            }),
        }
    }

    /// Open the dialog for `info`. Always starts in `Idle`, whatever the
    /// previous session ended in.
    pub fn open(&self, info: UpdateInfo) -> u64 {
        let id = self.shared.next_session_id.fetch_add(1, Ordering::Relaxed);
        let mut guard = self.shared.lock();
        let previous = guard.take().map(|session| session.state).unwrap_or_default();
        let (state, _) = InstallStateMachine::transition(previous, InstallEvent::SessionReset);
        let session = Session {
            id,
            info,
            state,
            progress: None,
        };
        info!(
            session_id = id,
            version = %session.info.version,
            "update dialog opened"
        );
        self.shared.publish(&session);
        *guard = Some(session);
        id
    }

    /// Close the dialog unconditionally.
    pub fn close(&self) {
        let mut guard = self.shared.lock();
        if let Some(session) = guard.take() {
            info!(session_id = session.id, "update dialog closed");
            self.shared.watch_tx.send_replace(InstallState::Idle);
            if let Err(err) = self.shared.emitter.emit_dialog(None) {
                warn!(error = %err, "failed to emit update dialog close");
            }
        }
    }

    /// User-initiated close ("Later", escape, outside click).
    ///
    /// Refused while installing. Returns whether the dialog is now closed.
    pub fn dismiss(&self) -> bool {
        if self.state().is_installing() {
            debug!("dismiss ignored while installing");
            return false;
        }
        self.close();
        true
    }

    /// Request an install, or a retry after a failure.
    ///
    /// Ignored while this session is already installing. The host command
    /// runs in the background; the returned state is the one right after the
    /// request was applied.
    pub fn install(&self) -> Result<InstallState, InstallerError> {
        let session_id = self.session_id().ok_or(InstallerError::NoSession)?;
        let mut in_flight = self.shared.lock_in_flight();
        let actions = self
            .shared
            .dispatch(session_id, InstallEvent::InstallRequested);

        for action in actions {
            match action {
                InstallAction::BeginInstall => match in_flight.replace(session_id) {
                    Some(previous) => info!(
                        session_id,
                        previous, "install command already running, taking it over"
                    ),
                    None => self.begin_install(session_id),
                },
            }
        }
        drop(in_flight);
        Ok(self.state())
    }

    fn begin_install(&self, session_id: u64) {
        let shared = self.shared.clone();
        let sink: InstallProgressSink = {
            let shared = shared.clone();
            Arc::new(move |progress| shared.record_progress(progress))
        };

        info!(session_id, "issuing install command");
        tokio::spawn(
            async move {
                match shared.updater.install(sink).await {
                    Ok(never) => match never {},
                    Err(err) => {
                        warn!(error = %err, "update install failed");
                        let owner = shared.lock_in_flight().take();
                        if let Some(owner) = owner {
                            shared.dispatch(
                                owner,
                                InstallEvent::InstallFailed {
                                    message: err.to_string(),
                                },
                            );
                        }
                    }
                }
            }
            .instrument(info_span!("usecase.update.install", session_id)),
        );
    }

    /// Current state; `Idle` when no dialog is open.
    pub fn state(&self) -> InstallState {
        self.shared
            .lock()
            .as_ref()
            .map(|session| session.state.clone())
            .unwrap_or_default()
    }

    pub fn session_id(&self) -> Option<u64> {
        self.shared.lock().as_ref().map(|session| session.id)
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().is_some()
    }

    pub fn view(&self) -> Option<UpdateDialogView> {
        self.shared.lock().as_ref().map(Session::view)
    }

    /// Whether a host install command is running, whichever session issued it.
    pub fn is_install_in_flight(&self) -> bool {
        self.shared.lock_in_flight().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<InstallState> {
        self.shared.watch_tx.subscribe()
    }
}
