//! Patchwing Core - Core library for LLM-backed code review
//!
//! This crate takes a textual code patch, wraps it in a review prompt, and
//! sends it to a hosted chat-completion backend (an OpenAI-compatible API or
//! an Azure OpenAI deployment), returning the model's review text.

pub mod backend;
pub mod config;
pub mod error;
pub mod review;

pub use backend::Backend;
pub use config::ReviewConfig;
pub use error::{Error, Result};
pub use review::{ReviewRequester, TimingHook};
