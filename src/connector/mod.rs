//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Hosted model clients (Gemini, plus a mock for offline runs)
//! - Session storage (in-memory)
//! - Display surfaces (HTTP pages and JSON API, terminal controllers)

pub mod adapter;
pub mod api;
pub mod web;

pub use adapter::*;
