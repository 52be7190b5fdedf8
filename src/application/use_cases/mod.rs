mod fetch_response;
mod manage_session;
mod submit_question;

pub use fetch_response::*;
pub use manage_session::*;
pub use submit_question::*;
