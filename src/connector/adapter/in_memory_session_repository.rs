use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::SessionRepository;
use crate::domain::{DomainError, Message, Session, SessionId};

/// Process-local session store. Everything is lost on restart.
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn with_session<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> T + Send,
    ) -> Result<T, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("session {}", id)))?;
        Ok(f(session))
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self) -> Result<Session, DomainError> {
        let session = Session::new();
        self.sessions
            .lock()
            .await
            .insert(session.id(), session.clone());
        debug!("Created session {}", session.id());
        Ok(session)
    }

    async fn find(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.lock().await.get(&id).cloned())
    }

    async fn append(&self, id: SessionId, message: Message) -> Result<(), DomainError> {
        let role = message.role();
        let len = self
            .with_session(id, move |s| {
                s.append(message);
                s.len()
            })
            .await?;
        debug!("Session {}: appended {} message (now {})", id, role, len);
        Ok(())
    }

    async fn messages(&self, id: SessionId) -> Result<Vec<Message>, DomainError> {
        self.with_session(id, |s| s.transcript().to_vec()).await
    }

    async fn set_draft(&self, id: SessionId, draft: &str) -> Result<(), DomainError> {
        let draft = draft.to_string();
        self.with_session(id, move |s| s.set_draft(draft)).await
    }

    async fn clear_draft(&self, id: SessionId) -> Result<(), DomainError> {
        self.with_session(id, |s| s.clear_draft()).await
    }

    async fn delete(&self, id: SessionId) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("session {}", id)))
    }

    async fn remove_idle(&self, cutoff: i64) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.updated_at() > cutoff);
        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.lock().await.len())
    }
}
