mod chat_prompt;
mod legal_domain;
mod message;
mod session;

pub use chat_prompt::*;
pub use legal_domain::*;
pub use message::*;
pub use session::*;
