use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Message;

pub type SessionId = Uuid;

/// One user's conversation: the transcript plus the input slot that holds the
/// question currently being submitted.
///
/// The transcript is append-only. The only way to drop messages is to end the
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    transcript: Vec<Message>,
    draft: String,
    created_at: i64,
    updated_at: i64,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: SessionId) -> Self {
        let now = current_timestamp();
        Self {
            id,
            transcript: Vec::new(),
            draft: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    pub fn append(&mut self, message: Message) {
        self.transcript.push(message);
        self.touch();
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
        self.touch();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
        self.touch();
    }

    /// A user message with no assistant reply after it, left behind by a failed
    /// fetch.
    pub fn has_unanswered_question(&self) -> bool {
        self.last_message().is_some_and(Message::is_user)
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
