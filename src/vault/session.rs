use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// An authenticated user session. How it was obtained is not our concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The active, unexpired session if a user is signed in
    async fn current_session(&self) -> Option<Session>;

    /// Receiver notified on every sign-in and sign-out
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    async fn sign_out(&self);
}

/// Session provider holding the current session in memory
#[derive(Debug)]
pub struct MemorySessions {
    tx: watch::Sender<Option<Session>>,
}

impl Default for MemorySessions {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessions {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Install a session produced by an external sign-in flow
    pub fn sign_in(&self, session: Session) {
        log::info!("Session started for {}", session.user_id);
        self.tx.send_replace(Some(session));
    }
}

#[async_trait]
impl SessionProvider for MemorySessions {
    async fn current_session(&self) -> Option<Session> {
        self.tx
            .borrow()
            .as_ref()
            .filter(|session| !session.is_expired())
            .cloned()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    async fn sign_out(&self) {
        if let Some(session) = self.tx.send_replace(None) {
            log::info!("Session ended for {}", session.user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(user_id: &str, ttl: Duration) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: None,
            expires_at: Utc::now() + ttl,
        }
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let sessions = MemorySessions::new();
        assert!(sessions.current_session().await.is_none());

        sessions.sign_in(session("alice", Duration::hours(1)));
        assert_eq!(
            sessions.current_session().await.map(|s| s.user_id),
            Some("alice".to_string())
        );

        sessions.sign_out().await;
        assert!(sessions.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_ignored() {
        let sessions = MemorySessions::new();
        sessions.sign_in(session("bob", Duration::seconds(-1)));
        assert!(sessions.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let sessions = MemorySessions::new();
        let mut rx = sessions.subscribe();

        sessions.sign_in(session("carol", Duration::hours(1)));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|s| s.user_id.clone()),
            Some("carol".to_string())
        );

        sessions.sign_out().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
