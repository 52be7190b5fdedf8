pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    system_instruction, ChatClient, FetchResponseUseCase, SessionRepository, SessionUseCase,
    SubmitOutcome, SubmitQuestionUseCase,
};

pub use cli::Commands;

pub use connector::{
    GeminiClient, GeminiConfig, InMemorySessionRepository, MockChatClient,
};

pub use domain::{
    ChatPrompt, DomainError, LegalDomain, Message, PromptEntry, PromptRole, Role, Session,
    SessionId,
};
