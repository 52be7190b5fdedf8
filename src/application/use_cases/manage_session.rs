use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::application::SessionRepository;
use crate::domain::{DomainError, Message, Session, SessionId};

/// Creation and teardown points for conversation state.
pub struct SessionUseCase {
    sessions: Arc<dyn SessionRepository>,
}

impl SessionUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn start(&self) -> Result<SessionId, DomainError> {
        let session = self.sessions.create().await?;
        info!("Started session {}", session.id());
        Ok(session.id())
    }

    pub async fn snapshot(&self, id: SessionId) -> Result<Session, DomainError> {
        self.sessions
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("session {}", id)))
    }

    pub async fn transcript(&self, id: SessionId) -> Result<Vec<Message>, DomainError> {
        self.sessions.messages(id).await
    }

    pub async fn end(&self, id: SessionId) -> Result<(), DomainError> {
        self.sessions.delete(id).await?;
        info!("Ended session {}", id);
        Ok(())
    }

    pub async fn active_count(&self) -> Result<usize, DomainError> {
        self.sessions.count().await
    }

    /// End every session that has not changed for at least `max_idle`.
    pub async fn expire_idle(&self, max_idle: Duration) -> Result<usize, DomainError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let cutoff = now - max_idle.as_secs() as i64;

        let removed = self.sessions.remove_idle(cutoff).await?;
        if removed > 0 {
            info!("Expired {} idle sessions", removed);
        } else {
            debug!("No idle sessions to expire");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::InMemorySessionRepository;

    #[tokio::test]
    async fn start_and_end_lifecycle() {
        let use_case = SessionUseCase::new(Arc::new(InMemorySessionRepository::new()));

        let id = use_case.start().await.unwrap();
        assert_eq!(use_case.active_count().await.unwrap(), 1);
        assert!(use_case.snapshot(id).await.unwrap().is_empty());

        use_case.end(id).await.unwrap();
        assert_eq!(use_case.active_count().await.unwrap(), 0);
        assert!(use_case.snapshot(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn expire_idle_ends_stale_sessions_only() {
        let use_case = SessionUseCase::new(Arc::new(InMemorySessionRepository::new()));
        let id = use_case.start().await.unwrap();

        assert_eq!(use_case.expire_idle(Duration::from_secs(3600)).await.unwrap(), 0);
        assert!(use_case.snapshot(id).await.is_ok());

        assert_eq!(use_case.expire_idle(Duration::ZERO).await.unwrap(), 1);
        assert!(use_case.snapshot(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn sessions_do_not_share_transcripts() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let use_case = SessionUseCase::new(repo.clone());

        let a = use_case.start().await.unwrap();
        let b = use_case.start().await.unwrap();
        repo.append(a, Message::user("only in a")).await.unwrap();

        assert_eq!(use_case.transcript(a).await.unwrap().len(), 1);
        assert!(use_case.transcript(b).await.unwrap().is_empty());
    }
}
