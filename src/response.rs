//! JSON payloads written to stdout.

use serde::Serialize;

pub const NO_INPUT: &str = "No input text provided";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentResponse {
    pub intent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn no_input() -> Self {
        Self {
            error: NO_INPUT.to_string(),
        }
    }
}

/// Returns the text to classify, or `None` when it is absent or blank.
pub fn input_text(arg: Option<String>) -> Option<String> {
    arg.filter(|text| !text.trim().is_empty())
}
