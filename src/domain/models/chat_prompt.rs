use serde::{Deserialize, Serialize};

use super::{Message, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

impl From<Role> for PromptRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => PromptRole::User,
            Role::Assistant => PromptRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    pub role: PromptRole,
    pub content: String,
}

/// Everything sent to the model for one reply: the instruction, the prior
/// conversation, and the user turn that triggers the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPrompt {
    system_instruction: String,
    history: Vec<Message>,
    turn: String,
}

impl ChatPrompt {
    pub fn new(system_instruction: impl Into<String>, turn: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history: Vec::new(),
            turn: turn.into(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn turn(&self) -> &str {
        &self.turn
    }

    /// Flattened order: instruction, history, turn.
    pub fn entries(&self) -> Vec<PromptEntry> {
        let mut entries = Vec::with_capacity(self.history.len() + 2);
        entries.push(PromptEntry {
            role: PromptRole::System,
            content: self.system_instruction.clone(),
        });
        entries.extend(self.history.iter().map(|m| PromptEntry {
            role: m.role().into(),
            content: m.content().to_string(),
        }));
        entries.push(PromptEntry {
            role: PromptRole::User,
            content: self.turn.clone(),
        });
        entries
    }

    /// Number of entries [`entries`](Self::entries) yields.
    pub fn entry_count(&self) -> usize {
        self.history.len() + 2
    }
}
