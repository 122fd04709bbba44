//! Prompt assembly
//!
//! The final prompt sent to the generation service is built from the parsed
//! request after option parsing is done; the raw token stream is never
//! touched here.

use super::options::SlashRequest;

/// Fixed description of the brand mascot, prepended to every prompt so the
/// fine-tuned model stays on style.
pub const MASCOT_PREFIX: &str = "\
A small yellow robot mascot with a rounded rectangular head and glossy black eyes. \
Its head-to-body proportions are balanced, never exaggerated, and it stands about \
as tall as a seven-year-old child.";

/// Build the full prompt for one request
///
/// When the command asked for rendered text (`--words`), an expanded clause
/// demanding a legible, centered, high-contrast rendering of the literal
/// string is appended.
pub fn build_prompt(request: &SlashRequest) -> String {
    let mut prompt = format!("{}\n{}", MASCOT_PREFIX, request.prompt);

    if let Some(text) = &request.render_text {
        prompt.push_str(&format!(
            "\nThe image must contain the exact text \"{}\" rendered clearly and legibly, \
             centered in the composition, in high contrast against the background.",
            text
        ));
    }

    prompt
}
