//! Update installation state machine.
//!
//! Pure state transition function for one update dialog session. There is no
//! `Succeeded` state: a successful install replaces or restarts the running
//! process, so success is never observed from inside it.

use serde::{Deserialize, Serialize};

/// Installation state of the current dialog session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InstallState {
    #[default]
    Idle,
    Installing,
    Failed { message: String },
}

impl InstallState {
    pub fn is_installing(&self) -> bool {
        matches!(self, InstallState::Installing)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            InstallState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Events that drive the installation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallEvent {
    /// User asked to install (first attempt or retry).
    InstallRequested,
    /// Host install command rejected.
    InstallFailed { message: String },
    /// Dialog opened for a new session or closed.
    SessionReset,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallAction {
    /// Issue the host install command.
    BeginInstall,
}

pub struct InstallStateMachine;

impl InstallStateMachine {
    pub fn transition(
        state: InstallState,
        event: InstallEvent,
    ) -> (InstallState, Vec<InstallAction>) {
        match (state, event) {
            (_, InstallEvent::SessionReset) => (InstallState::Idle, Vec::new()),
            // At most one in-flight install command per session.
            (InstallState::Installing, InstallEvent::InstallRequested) => {
                (InstallState::Installing, Vec::new())
            }
            (InstallState::Idle, InstallEvent::InstallRequested)
            | (InstallState::Failed { .. }, InstallEvent::InstallRequested) => {
                (InstallState::Installing, vec![InstallAction::BeginInstall])
            }
            (InstallState::Installing, InstallEvent::InstallFailed { message }) => {
                (InstallState::Failed { message }, Vec::new())
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InstallAction, InstallEvent, InstallState, InstallStateMachine};

    #[test]
    fn idle_install_request_begins_install() {
        let (next, actions) =
            InstallStateMachine::transition(InstallState::Idle, InstallEvent::InstallRequested);
        assert_eq!(next, InstallState::Installing);
        assert_eq!(actions, vec![InstallAction::BeginInstall]);
    }

    #[test]
    fn install_request_while_installing_is_ignored() {
        let (next, actions) = InstallStateMachine::transition(
            InstallState::Installing,
            InstallEvent::InstallRequested,
        );
        assert_eq!(next, InstallState::Installing);
        assert!(actions.is_empty());
    }

    #[test]
    fn failure_while_installing_records_message() {
        let (next, actions) = InstallStateMachine::transition(
            InstallState::Installing,
            InstallEvent::InstallFailed {
                message: "disk full".into(),
            },
        );
        assert_eq!(
            next,
            InstallState::Failed {
                message: "disk full".into()
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn retry_from_failed_clears_message() {
        let failed = InstallState::Failed {
            message: "network error".into(),
        };
        let (next, actions) =
            InstallStateMachine::transition(failed, InstallEvent::InstallRequested);
        assert_eq!(next, InstallState::Installing);
        assert_eq!(next.error_message(), None);
        assert_eq!(actions, vec![InstallAction::BeginInstall]);
    }

    #[test]
    fn failure_outside_installing_is_ignored() {
        let (next, _) = InstallStateMachine::transition(
            InstallState::Idle,
            InstallEvent::InstallFailed {
                message: "late".into(),
            },
        );
        assert_eq!(next, InstallState::Idle);
    }

    #[test]
    fn session_reset_returns_to_idle_from_any_state() {
        for state in [
            InstallState::Idle,
            InstallState::Installing,
            InstallState::Failed {
                message: "x".into(),
            },
        ] {
            let (next, actions) =
                InstallStateMachine::transition(state, InstallEvent::SessionReset);
            assert_eq!(next, InstallState::Idle);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn state_serializes_with_type_tag() {
        let failed = serde_json::to_value(InstallState::Failed {
            message: "oops".into(),
        })
        .unwrap();
        assert_eq!(
            failed,
            serde_json::json!({ "type": "failed", "message": "oops" })
        );
        let idle = serde_json::to_value(InstallState::Idle).unwrap();
        assert_eq!(idle, serde_json::json!({ "type": "idle" }));
    }
}
