use std::fmt;
use std::sync::Arc;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use crate::config::constants::MAX_SESSION_ID_LENGTH;
use crate::enums::request_state::RequestState;
use crate::errors::{LungLensError, LungLensResult};
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::file_info::FileInfo;
use crate::structs::session::Session;
use crate::structs::user::User;

/// Mock sign-in. Any non-empty email opens a session; passwords are never checked.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn login(&self, email: &str, _password: Option<&str>) -> LungLensResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LungLensError::user_input_error(email, "an email address", "Please enter an email address."));
        }

        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            id: session_id.clone(),
            user: User { email: email.to_string() },
            state: RequestState::Idle,
            last_result: None,
            last_file_info: None,
            created_at: Utc::now(),
        };

        self.sessions.insert(session_id.clone(), session);
        log::info!("🔐 Signed in {}", email);
        Ok(session_id)
    }

    pub fn logout(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id);
        if let Some((_, session)) = &removed {
            log::info!("👋 Signed out {}", session.user.email);
        }
        removed.is_some()
    }

    pub fn current_user(&self, session_id: &str) -> Option<User> {
        self.sessions.get(session_id).map(|entry| entry.user.clone())
    }

    pub fn get_session(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    /// Move the session to `Pending`. A session that is already pending is refused.
    ///
    /// The returned guard puts the session back to `Idle` if it is dropped
    /// before `finish_analysis` records a terminal state.
    pub fn begin_analysis(&self, session_id: &str) -> LungLensResult<PendingGuard> {
        {
            let mut session = self
                .sessions
                .get_mut(session_id)
                .ok_or_else(|| LungLensError::SessionNotFound { session_id: session_id.to_string() })?;

            if session.state.is_pending() {
                return Err(LungLensError::AnalysisInProgress { session_id: session_id.to_string() });
            }

            session.state = RequestState::Pending;
            session.last_result = None;
        }

        Ok(PendingGuard {
            sessions: Arc::clone(&self.sessions),
            session_id: session_id.to_string(),
        })
    }

    pub fn finish_analysis(
        &self,
        session_id: &str,
        state: RequestState,
        result: AnalysisResult,
        file_info: Option<FileInfo>,
    ) -> LungLensResult<()> {
        if !state.is_terminal() {
            return Err(LungLensError::validation_error(
                "state",
                &format!("{:?}", state),
                "must be succeeded, degraded or failed",
                None,
            ));
        }

        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| LungLensError::SessionNotFound { session_id: session_id.to_string() })?;

        session.state = state;
        session.last_result = Some(result);
        session.last_file_info = file_info;
        Ok(())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Held for the lifetime of one analysis request.
#[must_use = "dropping the guard releases the pending session immediately"]
pub struct PendingGuard {
    sessions: Arc<DashMap<String, Session>>,
    session_id: String,
}

impl fmt::Debug for PendingGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGuard").field("session_id", &self.session_id).finish()
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if let Some(mut session) = self.sessions.get_mut(&self.session_id) {
            if session.state.is_pending() {
                session.state = RequestState::Idle;
                log::warn!("⚠️ Analysis for session {} was abandoned, back to idle", self.session_id);
            }
        }
    }
}

/// Strip a client-supplied session id down to the characters a UUID can contain.
pub fn sanitize_session_id(session_id: &str) -> String {
    session_id
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_SESSION_ID_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_email_is_rejected() {
        let manager = SessionManager::new();
        let error = manager.login("   ", Some("secret")).expect_err("empty email");
        assert!(error.user_message().contains("Please enter an email address."));
        assert_eq!(manager.session_count(), 0);
    }

    #[test]
    fn dropped_guard_returns_session_to_idle() {
        let manager = SessionManager::new();
        let id = manager.login("someone", None).expect("login");

        let guard = manager.begin_analysis(&id).expect("first analysis");
        assert!(manager.begin_analysis(&id).is_err());
        drop(guard);

        let session = manager.get_session(&id).expect("session");
        assert_eq!(session.state, RequestState::Idle);
        let _guard = manager.begin_analysis(&id).expect("analysis after abandon");
    }

    #[test]
    fn finished_analysis_outlives_its_guard() {
        let manager = SessionManager::new();
        let id = manager.login("a@b.test", None).expect("login");

        let guard = manager.begin_analysis(&id).expect("analysis");
        manager
            .finish_analysis(&id, RequestState::Failed, AnalysisResult::error(), None)
            .expect("finish");
        drop(guard);

        assert_eq!(manager.get_session(&id).expect("session").state, RequestState::Failed);
    }

    #[test]
    fn sanitize_drops_unsafe_characters() {
        assert_eq!(sanitize_session_id("abc-123'; DROP"), "abc-123DROP");
        assert_eq!(sanitize_session_id(&"a".repeat(100)).len(), MAX_SESSION_ID_LENGTH);
    }
}
