//! Review prompt construction
//!
//! The instruction string is the same for both providers; only its delivery
//! differs. The primary provider gets instruction and patch concatenated
//! into one prompt, the alternate provider gets them as separate system and
//! user messages.

/// Built-in review instruction, used when no custom prompt is configured
pub const DEFAULT_INSTRUCTION: &str = "Below is a code patch, please help me do a brief code \
     review on it. Any bug risks and/or improvement suggestions are welcome:";

/// Build the instruction string from an optional custom prompt and an
/// optional answer language
///
/// The language directive is appended at most once, in the form
/// `Answer me in {language},`.
pub fn review_instruction(custom_prompt: Option<&str>, language: Option<&str>) -> String {
    let base = custom_prompt.unwrap_or(DEFAULT_INSTRUCTION);

    let language_directive = language
        .map(|lang| format!("Answer me in {},", lang))
        .unwrap_or_default();

    format!("{}, {}", base, language_directive)
}

/// Concatenate instruction and patch into the single-prompt form used by
/// the primary provider
pub fn combined_prompt(instruction: &str, patch: &str) -> String {
    format!("{}:\n\n{}", instruction, patch)
}
