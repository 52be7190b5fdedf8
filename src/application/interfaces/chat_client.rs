use async_trait::async_trait;

use crate::domain::{ChatPrompt, DomainError};

/// An interface for sending a chat prompt to a hosted model and receiving its
/// text reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Every failure is reported as [`DomainError::ExternalService`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, DomainError>;

    /// Human-readable name of the backing model, used in logs and page footers.
    fn model_name(&self) -> &str;
}
