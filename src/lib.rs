//! Relay that turns a topic into keywords and keywords into creative prompts
//!
//! Requests name a provider (Gemini or OpenRouter) and carry that provider's
//! credentials. The relay builds the instruction, calls the provider through a
//! shared adapter interface, and parses the free-form completion back into an
//! exact list of keywords or prompts.

pub mod ai;
pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod server;
pub mod settings;

pub use error::{Error, Result};
