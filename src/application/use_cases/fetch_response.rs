use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{ChatPrompt, DomainError, LegalDomain, Message};

/// Instruction sent ahead of every conversation. `{domain}` is replaced with
/// an empty string for [`LegalDomain::AllLaws`] and ` (<label>)` otherwise.
const SYSTEM_INSTRUCTION_TEMPLATE: &str = "You are a knowledgeable and precise Indian legal assistant. \
Provide concise answers based on Indian law{domain}. \
If the law is unclear, say 'Please consult a certified lawyer for this specific case.' \
Do not fabricate any legal rules.";

pub fn system_instruction(domain: LegalDomain) -> String {
    let domain_text = if domain.is_all() {
        String::new()
    } else {
        format!(" ({})", domain.label())
    };
    SYSTEM_INSTRUCTION_TEMPLATE.replace("{domain}", &domain_text)
}

/// Turns a transcript into a prompt and asks the model for the next reply.
///
/// Never mutates the transcript: the caller appends both turns.
pub struct FetchResponseUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl FetchResponseUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    /// The newest user message becomes the triggering turn; everything before it
    /// is history.
    pub fn build_prompt(
        &self,
        transcript: &[Message],
        domain: LegalDomain,
    ) -> Result<ChatPrompt, DomainError> {
        let (last, history) = transcript
            .split_last()
            .ok_or_else(|| DomainError::invalid_input("transcript is empty"))?;

        if !last.is_user() {
            return Err(DomainError::invalid_input(
                "transcript must end with a user message",
            ));
        }

        Ok(ChatPrompt::new(system_instruction(domain), last.content()).with_history(history.to_vec()))
    }

    pub async fn execute(
        &self,
        transcript: &[Message],
        domain: LegalDomain,
    ) -> Result<String, DomainError> {
        let prompt = self.build_prompt(transcript, domain)?;

        debug!(
            "Fetching reply from {} ({} prompt entries, domain: {})",
            self.chat_client.model_name(),
            prompt.entry_count(),
            domain
        );

        let start_time = Instant::now();
        let reply = self.chat_client.complete(&prompt).await.map_err(|e| {
            warn!("Model call failed after {:?}: {}", start_time.elapsed(), e);
            e
        })?;

        debug!(
            "Received {} chars in {:?}",
            reply.len(),
            start_time.elapsed()
        );

        Ok(reply)
    }
}
