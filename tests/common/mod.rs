//! Tiny on-disk artifacts shared by the unit and integration tests.
//!
//! Only external crates are used here so the same file can be compiled inside
//! the library (`#[path]`) and as an integration-test module.

#![allow(dead_code)]

use candle_core::{DType, Device};
use candle_nn::{linear, VarBuilder, VarMap};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel};
use std::path::Path;

pub const TINY_CONFIG: &str = r#"{
    "vocab_size": 16,
    "dim": 8,
    "n_layers": 1,
    "n_heads": 2,
    "hidden_dim": 16,
    "activation": "gelu",
    "max_position_embeddings": 64,
    "initializer_range": 0.02,
    "pad_token_id": 0,
    "model_type": "distilbert"
}"#;

/// Width of the encoder described by [`TINY_CONFIG`].
pub const TINY_DIM: usize = 8;

pub const TINY_VOCAB: &str = "[PAD]\n[UNK]\n[CLS]\n[SEP]\n[MASK]\nhello\nwhere\nis\nmy\norder\ncancel\nrefund\nthanks\nbye\n##s\nplease\n";

pub const LABELS: [&str; 4] = ["greeting", "track_order", "cancel_order", "goodbye"];

/// How the encoder and head tensors are named in a weight file.
#[derive(Debug, Clone, Copy)]
pub struct WeightLayout {
    pub encoder_prefix: &'static str,
    pub pre_classifier: bool,
}

impl WeightLayout {
    /// `bert.*` + `classifier.*`, as saved by the training module.
    pub const TRAINING: Self = Self {
        encoder_prefix: "bert",
        pre_classifier: false,
    };

    /// `distilbert.*` + `pre_classifier.*` + `classifier.*`, as exported by
    /// `DistilBertForSequenceClassification`.
    pub const SEQUENCE_CLASSIFICATION: Self = Self {
        encoder_prefix: "distilbert",
        pre_classifier: true,
    };
}

/// Writes config, vocab, label map and randomly initialised weights into `dir`.
pub fn write_artifacts(dir: &Path, labels: &[&str]) {
    write_artifacts_with_layout(dir, labels, WeightLayout::TRAINING);
}

pub fn write_artifacts_with_layout(dir: &Path, labels: &[&str], layout: WeightLayout) {
    std::fs::write(dir.join("config.json"), TINY_CONFIG).unwrap();
    std::fs::write(dir.join("vocab.txt"), TINY_VOCAB).unwrap();
    write_label_map(dir, labels);
    write_weights(&dir.join("intent_model.safetensors"), labels.len(), layout);
}

pub fn write_label_map(dir: &Path, labels: &[&str]) {
    let label_to_id: serde_json::Map<String, serde_json::Value> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.to_string(), i.into()))
        .collect();
    std::fs::write(
        dir.join("label2id.json"),
        serde_json::Value::Object(label_to_id).to_string(),
    )
    .unwrap();
}

pub fn write_weights(path: &Path, num_labels: usize, layout: WeightLayout) {
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    let config: DistilBertConfig = serde_json::from_str(TINY_CONFIG).unwrap();

    DistilBertModel::load(vb.pp(layout.encoder_prefix), &config).unwrap();
    if layout.pre_classifier {
        linear(TINY_DIM, TINY_DIM, vb.pp("pre_classifier")).unwrap();
    }
    linear(TINY_DIM, num_labels, vb.pp("classifier")).unwrap();
    varmap.save(path).unwrap();
}
