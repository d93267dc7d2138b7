//! Error types for this crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("candle error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required artifact could not be found or opened.
    #[error("artifact '{}': {reason}", path.display())]
    Artifact { path: PathBuf, reason: String },

    /// The label vocabulary does not cover `0..n` exactly once.
    #[error("invalid label vocabulary: {0}")]
    Labels(String),

    #[error("download error: {0}")]
    Download(String),

    #[error("device error: {0}")]
    Device(String),

    #[error("{0}")]
    Unexpected(String),
}

impl Error {
    pub(crate) fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Artifact {
            path: path.into(),
            reason: "not found".into(),
        }
    }
}

impl From<tokenizers::Error> for Error {
    fn from(err: tokenizers::Error) -> Self {
        Self::Tokenizer(err.to_string())
    }
}

impl From<hf_hub::api::sync::ApiError> for Error {
    fn from(err: hf_hub::api::sync::ApiError) -> Self {
        Self::Download(format!("HuggingFace API error: {err}"))
    }
}
