//! # Application Layer
//!
//! Use cases and the interfaces they depend on. Adapters in the connector layer
//! implement the interfaces.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
