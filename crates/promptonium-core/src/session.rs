//! Demo identity stub.
//!
//! There is no backend: every login and registration succeeds and yields the
//! fixed demo profile. The current session is an explicit [`SessionManager`]
//! owned by the caller.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::attempt::CompletionEvent;
use crate::catalog::Catalog;
use crate::error::{AuthError, SessionError};
use crate::events::Event;

/// Recent attempts kept on the profile.
pub const RECENT_ATTEMPTS_CAP: usize = 10;

pub const DEMO_TOKEN: &str = "demo_token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentAttempt {
    pub challenge_title: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub user_id: u64,
    pub total_score: f64,
    pub challenges_completed: u32,
    /// Newest first.
    pub recent_attempts: Vec<RecentAttempt>,
    pub achievements: Vec<Achievement>,
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

impl UserProfile {
    /// The fixed profile every login resolves to.
    pub fn demo() -> Self {
        let attempt = |title: &str, score: f64, at| RecentAttempt {
            challenge_title: title.to_string(),
            score,
            timestamp: at,
        };
        let achievement = |name: &str, at| Achievement {
            name: name.to_string(),
            earned_at: at,
        };
        Self {
            username: "demo_user".into(),
            user_id: 1,
            total_score: 2450.0,
            challenges_completed: 12,
            recent_attempts: vec![
                attempt("Professional Email", 94.0, day(2024, 1, 15)),
                attempt("Creative Story", 87.0, day(2024, 1, 14)),
                attempt("Technical Explanation", 91.0, day(2024, 1, 13)),
            ],
            achievements: vec![
                achievement("First Perfect Score", day(2024, 1, 10)),
                achievement("Speed Demon", day(2024, 1, 12)),
                achievement("Consistency Master", day(2024, 1, 14)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the current session with the demo profile. Credentials are
    /// not checked.
    pub fn login(&mut self, username: &str, _password: &str) -> Result<&Session, AuthError> {
        info!(username, "login");
        Ok(&*self.current.insert(Session {
            user: UserProfile::demo(),
            token: DEMO_TOKEN.into(),
        }))
    }

    /// Start a session on the demo profile renamed to `username`.
    pub fn register(
        &mut self,
        username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<&Session, AuthError> {
        info!(username, "register");
        let mut user = UserProfile::demo();
        user.username = username.to_string();
        Ok(&*self.current.insert(Session {
            user,
            token: DEMO_TOKEN.into(),
        }))
    }

    /// Clear user and token. Returns `SessionEnded` if a session existed.
    pub fn logout(&mut self) -> Option<Event> {
        self.current.take().map(|session| {
            info!(username = %session.user.username, "logout");
            Event::SessionEnded { at: Utc::now() }
        })
    }

    /// Log a finished attempt on the current profile.
    pub fn record_completion(
        &mut self,
        done: &CompletionEvent,
        catalog: &Catalog,
    ) -> Result<Event, SessionError> {
        let session = self.current.as_mut().ok_or(SessionError::NotLoggedIn)?;
        let user = &mut session.user;
        let title = catalog
            .get(&done.challenge_id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|_| done.challenge_id.clone());
        let score = done.result.total_score();

        user.recent_attempts.insert(
            0,
            RecentAttempt {
                challenge_title: title,
                score,
                timestamp: done.result.evaluated_at(),
            },
        );
        user.recent_attempts.truncate(RECENT_ATTEMPTS_CAP);
        user.total_score += score;
        user.challenges_completed += 1;

        Ok(Event::AttemptRecorded {
            username: user.username.clone(),
            challenge_id: done.challenge_id.clone(),
            total_score: score,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Evaluator, SimulatedEvaluator};
    use uuid::Uuid;

    fn completion(challenge_id: &str) -> CompletionEvent {
        let catalog = Catalog::builtin();
        let challenge = catalog.get(challenge_id).unwrap();
        CompletionEvent {
            attempt_id: Uuid::new_v4(),
            challenge_id: challenge_id.into(),
            prompt: "a prompt".into(),
            result: SimulatedEvaluator::seeded(3).evaluate("a prompt", challenge),
            time_taken_secs: 42,
        }
    }

    #[test]
    fn login_yields_demo_profile() {
        let mut sessions = SessionManager::new();
        let session = sessions.login("anyone", "wrong").unwrap();
        assert_eq!(session.user.username, "demo_user");
        assert_eq!(session.user.total_score, 2450.0);
        assert_eq!(session.user.recent_attempts.len(), 3);
        assert_eq!(session.user.achievements[1].name, "Speed Demon");
        assert_eq!(session.token, DEMO_TOKEN);
    }

    #[test]
    fn register_only_renames() {
        let mut sessions = SessionManager::new();
        let session = sessions.register("newbie", "n@example.com", "pw").unwrap();
        assert_eq!(session.user.username, "newbie");
        let mut expected = UserProfile::demo();
        expected.username = "newbie".into();
        assert_eq!(session.user, expected);
    }

    #[test]
    fn logout_clears_session() {
        let mut sessions = SessionManager::new();
        assert!(sessions.logout().is_none());
        sessions.login("demo_user", "x").unwrap();
        assert!(matches!(sessions.logout(), Some(Event::SessionEnded { .. })));
        assert!(sessions.current().is_none());
        assert!(!sessions.is_logged_in());
    }

    #[test]
    fn record_requires_login() {
        let mut sessions = SessionManager::new();
        assert_eq!(
            sessions.record_completion(&completion("recipe_instructions"), &Catalog::builtin()),
            Err(SessionError::NotLoggedIn)
        );
    }

    #[test]
    fn record_prepends_and_caps() {
        let catalog = Catalog::builtin();
        let mut sessions = SessionManager::new();
        sessions.login("demo_user", "x").unwrap();

        let done = completion("recipe_instructions");
        let event = sessions.record_completion(&done, &catalog).unwrap();
        assert!(matches!(event, Event::AttemptRecorded { .. }));
        let user = &sessions.current().unwrap().user;
        assert_eq!(user.recent_attempts.len(), 4);
        assert_eq!(user.recent_attempts[0].challenge_title, "Clear Recipe Instructions");
        assert_eq!(user.challenges_completed, 13);
        assert!((user.total_score - (2450.0 + done.result.total_score())).abs() < 1e-9);

        for _ in 0..20 {
            sessions.record_completion(&done, &catalog).unwrap();
        }
        let user = &sessions.current().unwrap().user;
        assert_eq!(user.recent_attempts.len(), RECENT_ATTEMPTS_CAP);
        assert_eq!(user.challenges_completed, 33);
    }
}
