use serde::{Deserialize, Serialize};

/// Lifecycle of one classification request as seen by a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Degraded,
    Failed,
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded | RequestState::Degraded | RequestState::Failed)
    }
}
