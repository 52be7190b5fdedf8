//! # Domain Layer
//!
//! Chat messages, sessions, legal domain filters and the prompt shape sent to the
//! model. This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
