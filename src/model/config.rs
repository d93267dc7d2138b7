use crate::error::{Error, Result};
use candle_transformers::models::distilbert::Config as DistilBertConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Encoder hyper-parameters plus the fields the classification head needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub encoder: DistilBertConfig,
    /// Hidden size of the encoder, the input width of the head.
    pub dim: usize,
    pub pad_token_id: u32,
    pub id_to_label: Option<HashMap<String, String>>,
}

#[derive(Deserialize)]
struct HeadFields {
    #[serde(alias = "hidden_size")]
    dim: usize,
    #[serde(default)]
    pad_token_id: u32,
    #[serde(default)]
    id2label: Option<HashMap<String, String>>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&raw)
    }

    // candle keeps `dim` private on its config, so it is read a second time here.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let head = HeadFields::deserialize(&value)?;
        let encoder = DistilBertConfig::deserialize(&value)?;
        Ok(Self {
            encoder,
            dim: head.dim,
            pad_token_id: head.pad_token_id,
            id_to_label: head.id2label,
        })
    }
}
