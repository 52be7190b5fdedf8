use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{
    ChatClient, FetchResponseUseCase, SessionRepository, SessionUseCase, SubmitQuestionUseCase,
};
use crate::connector::adapter::{
    GeminiClient, GeminiConfig, InMemorySessionRepository, MockChatClient,
};
use crate::domain::DomainError;

pub struct ContainerConfig {
    /// Answer with [`MockChatClient`] instead of calling Gemini.
    pub mock: bool,
    pub gemini: GeminiConfig,
}

impl ContainerConfig {
    pub fn from_env(mock: bool) -> Self {
        Self {
            mock,
            gemini: GeminiConfig::from_env(),
        }
    }

    /// Load `KEY=value` lines from an env file into the process environment.
    ///
    /// Variables already set are not overridden. A missing file is not an
    /// error and yields `Ok(false)`; a malformed one is a [`DomainError::Config`].
    pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, DomainError> {
        let path = path.as_ref();
        match dotenvy::from_path(path) {
            Ok(()) => Ok(true),
            Err(e) if e.not_found() => Ok(false),
            Err(e) => Err(DomainError::config(format!(
                "cannot load {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Wires adapters to use cases. One container serves every session of the
/// process; the sessions themselves live in the repository.
pub struct Container {
    sessions: Arc<dyn SessionRepository>,
    chat_client: Arc<dyn ChatClient>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let chat_client: Arc<dyn ChatClient> = if config.mock {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            let client = GeminiClient::new(config.gemini);
            if !client.has_api_key() {
                warn!("GEMINI_API_KEY is not set; questions will fail until it is configured");
            }
            debug!("Using Gemini model {} at {}", client.model_name(), client.url());
            Arc::new(client)
        };

        Self::with_parts(Arc::new(InMemorySessionRepository::new()), chat_client)
    }

    /// Assemble from explicit adapters (tests, embedding in another server).
    pub fn with_parts(
        sessions: Arc<dyn SessionRepository>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            sessions,
            chat_client,
        }
    }

    pub fn fetch_use_case(&self) -> FetchResponseUseCase {
        FetchResponseUseCase::new(self.chat_client.clone())
    }

    pub fn submit_use_case(&self) -> SubmitQuestionUseCase {
        SubmitQuestionUseCase::new(self.sessions.clone(), self.fetch_use_case())
    }

    pub fn session_use_case(&self) -> SessionUseCase {
        SessionUseCase::new(self.sessions.clone())
    }

    pub fn model_name(&self) -> &str {
        self.chat_client.model_name()
    }
}
