//! HTTP display surface: the chat page plus a small JSON API over the same
//! sessions.

pub mod page;
pub mod routes;
pub mod server;

pub use routes::{create_router, AppState};
pub use server::{WebServer, WebServerConfig};
