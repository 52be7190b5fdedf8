use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{ChatPrompt, DomainError, LegalDomain};

enum Behavior {
    Echo,
    Reply(String),
    Fail(String),
}

/// Offline stand-in for a hosted model. Records every prompt it receives.
pub struct MockChatClient {
    behavior: Behavior,
    prompts: Mutex<Vec<ChatPrompt>>,
}

impl MockChatClient {
    /// Replies with a canned answer that quotes the question.
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reply(reply.into()))
    }

    /// Every call fails with [`DomainError::ExternalService`].
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(reason.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// The domain whose qualifier the instruction carries, if any.
    fn qualified_domain(prompt: &ChatPrompt) -> Option<LegalDomain> {
        let instruction = prompt.system_instruction();
        LegalDomain::ALL
            .iter()
            .copied()
            .filter(|d| !d.is_all())
            .find(|d| instruction.contains(&format!("({})", d.label())))
    }

    fn echo(prompt: &ChatPrompt) -> String {
        let scope = match Self::qualified_domain(prompt) {
            Some(domain) => format!("under {}", domain.label()),
            None => "under Indian law".to_string(),
        };
        format!(
            "[mock] You asked {}: \"{}\" ({} earlier messages). \
Please consult a certified lawyer for this specific case.",
            scope,
            prompt.turn(),
            prompt.history().len()
        )
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, DomainError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.clone());
        }

        debug!("MockChatClient: received prompt with {} entries", prompt.entry_count());

        match &self.behavior {
            Behavior::Echo => Ok(Self::echo(prompt)),
            Behavior::Reply(reply) => Ok(reply.clone()),
            Behavior::Fail(reason) => Err(DomainError::external(format!(
                "MockChatClient: {}",
                reason
            ))),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
