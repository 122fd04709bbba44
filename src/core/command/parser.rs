//! Slash-command option parser
//!
//! Turns one free-text command into a [`SlashRequest`]. The parser is total:
//! it never fails, every unusable value falls back to its field default.
//!
//! The text is split at the first `--` occurrence; the prefix is the prompt,
//! the remainder is re-tokenized on whitespace and walked left to right
//! against a typed option table.

use super::options::{
    AspectRatio, DetailLevel, OutputCount, SlashRequest, DEFAULT_INFERENCE_STEPS,
    DEFAULT_STYLE_SCALE, STYLE_SCALE_RANGE,
};
use tracing::debug;

/// Recognized option flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    AspectRatio,
    NumOutputs,
    DetailLevel,
    MascotStyle,
    Words,
}

/// Option table: flag spelling to typed flag
fn lookup(token: &str) -> Option<Flag> {
    match token {
        "--aspect_ratio" | "--ar" => Some(Flag::AspectRatio),
        "--num_outputs" => Some(Flag::NumOutputs),
        "--detailed_level" => Some(Flag::DetailLevel),
        "--mascot_style" => Some(Flag::MascotStyle),
        "--words" => Some(Flag::Words),
        _ => None,
    }
}

/// Parse a slash-command text into a validated request
pub fn parse(text: &str) -> SlashRequest {
    let (prompt, params) = split_prompt(text);

    let mut request = SlashRequest {
        prompt,
        ..Default::default()
    };

    let tokens: Vec<&str> = params.split_whitespace().collect();
    let mut idx = 0;
    while idx < tokens.len() {
        match lookup(tokens[idx]) {
            Some(Flag::Words) => {
                // free text run: everything up to the next flag-shaped token
                let start = idx + 1;
                let mut end = start;
                while end < tokens.len() && !tokens[end].starts_with("--") {
                    end += 1;
                }
                if end > start {
                    request.render_text = Some(tokens[start..end].join(" "));
                }
                idx = end;
            }
            Some(flag) => {
                // Scalar flags always consume two positions, even when the
                // value turns out to be another flag or is missing entirely.
                // A flag without its value therefore desynchronizes the rest
                // of the walk; that behavior is contractual (see tests).
                if let Some(value) = tokens.get(idx + 1) {
                    apply_scalar(&mut request, flag, value);
                }
                idx += 2;
            }
            None => idx += 1,
        }
    }

    request
}

/// Assign one scalar option, falling back to the field default on invalid input
fn apply_scalar(request: &mut SlashRequest, flag: Flag, value: &str) {
    match flag {
        Flag::AspectRatio => {
            request.aspect_ratio = match AspectRatio::from_token(value) {
                Some(ratio) => ratio,
                None => {
                    debug!(value, "invalid aspect_ratio, using default");
                    AspectRatio::default()
                }
            };
        }
        Flag::NumOutputs => {
            request.num_outputs = match OutputCount::from_token(value) {
                Some(count) => count,
                None => {
                    debug!(value, "invalid num_outputs, using default");
                    OutputCount::default()
                }
            };
        }
        Flag::DetailLevel => {
            request.inference_steps = match DetailLevel::from_token(value) {
                Some(level) => level.inference_steps(),
                None => {
                    debug!(value, "invalid detailed_level, using default");
                    DEFAULT_INFERENCE_STEPS
                }
            };
        }
        Flag::MascotStyle => {
            request.style_scale = match value.parse::<f64>() {
                Ok(scale) if STYLE_SCALE_RANGE.contains(&scale) => scale,
                _ => {
                    debug!(value, "invalid mascot_style, using default");
                    DEFAULT_STYLE_SCALE
                }
            };
        }
        Flag::Words => unreachable!("words flag is handled by the token walk"),
    }
}

/// Split the command text into (prompt, parameter text)
///
/// The parameter text keeps its leading `--` so the token walk sees the
/// first flag unchanged.
fn split_prompt(text: &str) -> (String, String) {
    match text.find("--") {
        Some(pos) => (
            text[..pos].trim().to_string(),
            text[pos..].to_string(),
        ),
        None => (text.trim().to_string(), String::new()),
    }
}
