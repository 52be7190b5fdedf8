pub mod container;
pub mod controller;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use router::Router;

pub const DISCLAIMER: &str = "Disclaimer: This chatbot provides information based on Indian law \
for educational purposes only. It is not official legal advice. For specific cases, please \
consult a certified lawyer.";
