use std::time::{Duration, Instant};

use dashmap::DashMap;
use lexi_core::{Bookmarks, RecentSearches};
use lexi_types::AuthUser;
use uuid::Uuid;

/// A signed-in user and the activity kept for them while they stay signed in
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: Uuid,
    pub user: AuthUser,
    pub id_token: String,
    pub recent_searches: RecentSearches,
    pub bookmarks: Bookmarks,
    pub created_at: Instant,
    pub last_activity: Instant,
}

impl AuthSession {
    fn new(user: AuthUser, id_token: String) -> Self {
        let now = Instant::now();
        Self {
            token: Uuid::new_v4(),
            user,
            id_token,
            recent_searches: RecentSearches::new(),
            bookmarks: Bookmarks::new(),
            created_at: now,
            last_activity: now,
        }
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Authentication required")]
    MissingToken,
    #[error("Session not found or expired")]
    UnknownSession,
}

/// Sessions keyed by the opaque token handed to the browser
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, AuthSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user: AuthUser, id_token: String) -> AuthSession {
        let session = AuthSession::new(user, id_token);
        tracing::info!("Opened session for user {}", session.user.uid);
        self.sessions.insert(session.token, session.clone());
        session
    }

    /// Resolve an `Authorization` header value and mark the session active
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthSession, SessionError> {
        let header = header.ok_or(SessionError::MissingToken)?;
        let raw = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        let token = Uuid::parse_str(raw).map_err(|_| SessionError::UnknownSession)?;

        let mut session = self
            .sessions
            .get_mut(&token)
            .ok_or(SessionError::UnknownSession)?;
        session.last_activity = Instant::now();
        Ok(session.value().clone())
    }

    /// Run `f` against the live session, e.g. to record a search
    pub fn update<R>(&self, token: &Uuid, f: impl FnOnce(&mut AuthSession) -> R) -> Option<R> {
        self.sessions.get_mut(token).map(|mut session| f(session.value_mut()))
    }

    pub fn remove(&self, token: &Uuid) -> Option<AuthSession> {
        let removed = self.sessions.remove(token).map(|(_, session)| session);
        if let Some(session) = &removed {
            tracing::info!("Closed session for user {}", session.user.uid);
        }
        removed
    }

    /// Close every session of one user, returning how many were open
    pub fn remove_user(&self, uid: &str) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.user.uid != uid);
        let removed = before - self.sessions.len();
        tracing::info!("Closed {} sessions for user {}", removed, uid);
        removed
    }

    /// Drop sessions idle for longer than `timeout`, returning the users
    /// whose sessions were evicted
    pub fn cleanup_expired(&self, timeout: Duration) -> Vec<String> {
        let mut evicted = Vec::new();
        self.sessions.retain(|_, session| {
            if session.is_expired(timeout) {
                evicted.push(session.user.uid.clone());
                false
            } else {
                true
            }
        });
        if !evicted.is_empty() {
            tracing::info!("Evicted {} idle sessions", evicted.len());
        }
        evicted
    }

    pub fn is_signed_in(&self, uid: &str) -> bool {
        self.sessions.iter().any(|entry| entry.user.uid == uid)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(uid: &str) -> AuthUser {
        AuthUser {
            uid: uid.to_string(),
            email: format!("{}@example.com", uid),
            display_name: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_create_and_authenticate() {
        let registry = SessionRegistry::new();
        let session = registry.create(test_user("ada"), "token".to_string());

        let header = format!("Bearer {}", session.token);
        let found = registry.authenticate(Some(&header)).unwrap();
        assert_eq!(found.user.uid, "ada");

        // The bare token is accepted too
        assert!(registry.authenticate(Some(&session.token.to_string())).is_ok());
    }

    #[test]
    fn test_authenticate_failures() {
        let registry = SessionRegistry::new();
        assert!(matches!(
            registry.authenticate(None),
            Err(SessionError::MissingToken)
        ));
        assert!(matches!(
            registry.authenticate(Some("Bearer not-a-uuid")),
            Err(SessionError::UnknownSession)
        ));
        let unknown = format!("Bearer {}", Uuid::new_v4());
        assert!(matches!(
            registry.authenticate(Some(&unknown)),
            Err(SessionError::UnknownSession)
        ));
    }

    #[test]
    fn test_sign_out_clears_session() {
        let registry = SessionRegistry::new();
        let session = registry.create(test_user("ada"), String::new());

        assert!(registry.remove(&session.token).is_some());
        assert!(registry.remove(&session.token).is_none());
        assert!(registry.is_empty());
        assert!(!registry.is_signed_in("ada"));
    }

    #[test]
    fn test_remove_user_closes_all_sessions() {
        let registry = SessionRegistry::new();
        registry.create(test_user("ada"), String::new());
        registry.create(test_user("ada"), String::new());
        let lin = registry.create(test_user("lin"), String::new());

        assert_eq!(registry.remove_user("ada"), 2);
        assert!(!registry.is_signed_in("ada"));
        assert_eq!(registry.len(), 1);
        assert!(registry.authenticate(Some(&lin.token.to_string())).is_ok());
    }

    #[test]
    fn test_update_keeps_activity_on_session() {
        let registry = SessionRegistry::new();
        let session = registry.create(test_user("ada"), String::new());

        registry.update(&session.token, |s| s.recent_searches.record("luminous"));
        let bookmarked = registry.update(&session.token, |s| s.bookmarks.toggle("ethereal"));
        assert_eq!(bookmarked, Some(true));

        let header = format!("Bearer {}", session.token);
        let found = registry.authenticate(Some(&header)).unwrap();
        assert_eq!(found.recent_searches.terms(), &["luminous"]);
        assert!(found.bookmarks.contains("ethereal"));
    }

    #[test]
    fn test_cleanup_expired() {
        let registry = SessionRegistry::new();
        registry.create(test_user("ada"), String::new());
        registry.create(test_user("lin"), String::new());

        assert!(registry.cleanup_expired(Duration::from_secs(60)).is_empty());
        assert_eq!(registry.len(), 2);

        std::thread::sleep(Duration::from_millis(5));
        let mut evicted = registry.cleanup_expired(Duration::from_millis(1));
        evicted.sort();
        assert_eq!(evicted, vec!["ada", "lin"]);
        assert!(registry.is_empty());
    }
}
