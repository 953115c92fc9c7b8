//! Review prompt construction and the review operation

pub mod prompt;
pub mod requester;

pub use prompt::{combined_prompt, review_instruction, DEFAULT_INSTRUCTION};
pub use requester::{ReviewRequester, TimingHook};
