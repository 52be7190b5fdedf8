use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::{FetchResponseUseCase, SessionRepository};
use crate::domain::{DomainError, LegalDomain, Message, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Blank input: nothing appended, no model call, draft cleared.
    Ignored,
    Answered { reply: String },
}

impl SubmitOutcome {
    pub fn reply(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Answered { reply } => Some(reply),
        }
    }
}

/// One submission, run as a unit: store the draft, append the question, fetch,
/// append the reply, clear the draft.
///
/// When the fetch fails the question stays in the transcript without a reply
/// and the draft is left as typed. The error is returned unchanged.
pub struct SubmitQuestionUseCase {
    sessions: Arc<dyn SessionRepository>,
    fetcher: FetchResponseUseCase,
}

impl SubmitQuestionUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>, fetcher: FetchResponseUseCase) -> Self {
        Self { sessions, fetcher }
    }

    pub async fn execute(
        &self,
        session_id: SessionId,
        input: &str,
        domain: LegalDomain,
    ) -> Result<SubmitOutcome, DomainError> {
        if self.sessions.find(session_id).await?.is_none() {
            return Err(DomainError::not_found(format!("session {}", session_id)));
        }

        if input.trim().is_empty() {
            debug!("Ignoring blank submission for session {}", session_id);
            self.sessions.clear_draft(session_id).await?;
            return Ok(SubmitOutcome::Ignored);
        }

        self.sessions.set_draft(session_id, input).await?;
        self.sessions
            .append(session_id, Message::user(input))
            .await?;

        let transcript = self.sessions.messages(session_id).await?;

        let reply = match self.fetcher.execute(&transcript, domain).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    "Session {}: question left unanswered ({} messages): {}",
                    session_id,
                    transcript.len(),
                    e
                );
                return Err(e);
            }
        };

        self.sessions
            .append(session_id, Message::assistant(reply.as_str()))
            .await?;
        self.sessions.clear_draft(session_id).await?;

        info!(
            "Session {}: answered question #{} ({})",
            session_id,
            transcript.iter().filter(|m| m.is_user()).count(),
            domain
        );

        Ok(SubmitOutcome::Answered { reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{InMemorySessionRepository, MockChatClient};
    use crate::domain::Role;

    fn setup(client: Arc<MockChatClient>) -> (Arc<InMemorySessionRepository>, SubmitQuestionUseCase) {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let use_case =
            SubmitQuestionUseCase::new(sessions.clone(), FetchResponseUseCase::new(client));
        (sessions, use_case)
    }

    #[tokio::test]
    async fn answered_question_appends_user_then_assistant() {
        let client = Arc::new(MockChatClient::with_reply("Cheating and dishonesty."));
        let (sessions, use_case) = setup(client.clone());
        let session = sessions.create().await.unwrap();

        let outcome = use_case
            .execute(session.id(), "What is Section 420 IPC?", LegalDomain::Ipc)
            .await
            .unwrap();

        assert_eq!(outcome.reply(), Some("Cheating and dishonesty."));

        let messages = sessions.messages(session.id()).await.unwrap();
        let roles: Vec<Role> = messages.iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(messages[0].content(), "What is Section 420 IPC?");

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].entries().len(), 2);
        assert!(prompts[0]
            .system_instruction()
            .contains("(IPC (Indian Penal Code))"));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let client = Arc::new(MockChatClient::new());
        let (sessions, use_case) = setup(client.clone());
        let session = sessions.create().await.unwrap();

        for input in ["", "   ", "\n\t"] {
            let outcome = use_case
                .execute(session.id(), input, LegalDomain::AllLaws)
                .await
                .unwrap();
            assert_eq!(outcome, SubmitOutcome::Ignored);
        }

        assert!(sessions.messages(session.id()).await.unwrap().is_empty());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_orphan_question_and_draft() {
        let client = Arc::new(MockChatClient::failing("network unreachable"));
        let (sessions, use_case) = setup(client);
        let session = sessions.create().await.unwrap();

        let err = use_case
            .execute(session.id(), "Is a verbal will valid?", LegalDomain::Family)
            .await
            .unwrap_err();
        assert!(err.is_external());

        let stored = sessions.find(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored.has_unanswered_question());
        assert_eq!(stored.draft(), "Is a verbal will valid?");
    }

    #[tokio::test]
    async fn blank_submit_after_failure_clears_stale_draft() {
        let client = Arc::new(MockChatClient::failing("quota exceeded"));
        let (sessions, use_case) = setup(client.clone());
        let session = sessions.create().await.unwrap();

        use_case
            .execute(session.id(), "old q", LegalDomain::AllLaws)
            .await
            .unwrap_err();
        let outcome = use_case
            .execute(session.id(), "", LegalDomain::AllLaws)
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Ignored);
        let stored = sessions.find(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.draft(), "");
        assert!(stored.has_unanswered_question());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn success_clears_draft() {
        let (sessions, use_case) = setup(Arc::new(MockChatClient::new()));
        let session = sessions.create().await.unwrap();

        use_case
            .execute(session.id(), "What is bail?", LegalDomain::Crpc)
            .await
            .unwrap();

        let stored = sessions.find(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.draft(), "");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (_, use_case) = setup(Arc::new(MockChatClient::new()));
        let err = use_case
            .execute(uuid::Uuid::new_v4(), "hello", LegalDomain::AllLaws)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn second_question_carries_history() {
        let client = Arc::new(MockChatClient::new());
        let (sessions, use_case) = setup(client.clone());
        let session = sessions.create().await.unwrap();

        use_case
            .execute(session.id(), "What is an FIR?", LegalDomain::AllLaws)
            .await
            .unwrap();
        use_case
            .execute(session.id(), "Can police refuse it?", LegalDomain::AllLaws)
            .await
            .unwrap();

        let prompts = client.prompts();
        assert_eq!(prompts[1].history().len(), 2);
        assert_eq!(prompts[1].turn(), "Can police refuse it?");
        assert_eq!(sessions.messages(session.id()).await.unwrap().len(), 4);
    }
}
