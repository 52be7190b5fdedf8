use async_trait::async_trait;

use crate::domain::{DomainError, Message, Session, SessionId};

/// Session-scoped conversation state.
///
/// Every method that takes a `SessionId` returns [`DomainError::NotFound`] when
/// the session was never created or has already ended.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self) -> Result<Session, DomainError>;

    async fn find(&self, id: SessionId) -> Result<Option<Session>, DomainError>;

    /// Add a message to the end of the transcript.
    async fn append(&self, id: SessionId, message: Message) -> Result<(), DomainError>;

    /// The transcript in chronological order.
    async fn messages(&self, id: SessionId) -> Result<Vec<Message>, DomainError>;

    async fn set_draft(&self, id: SessionId, draft: &str) -> Result<(), DomainError>;

    async fn clear_draft(&self, id: SessionId) -> Result<(), DomainError>;

    async fn delete(&self, id: SessionId) -> Result<(), DomainError>;

    /// Drop every session last updated at or before `cutoff` (unix seconds).
    /// Returns how many were removed.
    async fn remove_idle(&self, cutoff: i64) -> Result<usize, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
