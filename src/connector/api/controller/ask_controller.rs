use anyhow::Result;

use crate::{LegalDomain, SubmitOutcome};

use super::super::Container;

/// One question, one throwaway session.
pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, question: String, domain: LegalDomain) -> Result<String> {
        let sessions = self.container.session_use_case();
        let session_id = sessions.start().await?;

        let outcome = self
            .container
            .submit_use_case()
            .execute(session_id, &question, domain)
            .await;

        // The session ends whether or not the model answered.
        sessions.end(session_id).await?;

        match outcome? {
            SubmitOutcome::Ignored => Ok("Nothing to ask: the question is empty.".to_string()),
            SubmitOutcome::Answered { reply } => Ok(reply),
        }
    }
}
