pub mod config;

pub use config::Config;

use crate::error::Result;
use candle_core::{IndexOp, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::DistilBertModel;

/// Tensor prefixes tried, in order, when no encoder prefix is configured.
const ENCODER_PREFIXES: [&str; 2] = ["bert", "distilbert"];

/// DistilBERT encoder with a linear head over the [CLS] hidden state.
pub struct IntentModel {
    encoder: DistilBertModel,
    pre_classifier: Option<Linear>,
    classifier: Linear,
}

impl IntentModel {
    pub fn load(
        vb: VarBuilder,
        config: &Config,
        num_labels: usize,
        encoder_prefix: Option<&str>,
    ) -> Result<Self> {
        let prefix = encoder_prefix.unwrap_or_else(|| detect_encoder_prefix(&vb));
        tracing::debug!(prefix, "loading encoder");
        let encoder = DistilBertModel::load(vb.pp(prefix), &config.encoder)?;

        // Hugging Face sequence-classification exports put a dense layer before the head.
        let pre_classifier = if vb.contains_tensor("pre_classifier.weight") {
            Some(linear(config.dim, config.dim, vb.pp("pre_classifier"))?)
        } else {
            None
        };
        let classifier = linear(config.dim, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            encoder,
            pre_classifier,
            classifier,
        })
    }

    /// Returns logits of shape `[batch, num_labels]`.
    ///
    /// `padding_mask` is `[batch, seq]` of `u8`, with 1 marking padding. This is
    /// the inverse of the tokenizer's attention mask.
    pub fn forward(&self, input_ids: &Tensor, padding_mask: &Tensor) -> Result<Tensor> {
        let (batch, seq_len) = padding_mask.dims2()?;
        let padding_mask = padding_mask.reshape((batch, 1, 1, seq_len))?;
        let hidden = self.encoder.forward(input_ids, &padding_mask)?;
        let pooled = hidden.i((.., 0))?;
        let pooled = match &self.pre_classifier {
            Some(pre_classifier) => pre_classifier.forward(&pooled)?.relu()?,
            None => pooled,
        };
        Ok(self.classifier.forward(&pooled)?)
    }
}

fn detect_encoder_prefix(vb: &VarBuilder) -> &'static str {
    ENCODER_PREFIXES
        .into_iter()
        .find(|prefix| vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight")))
        .unwrap_or(ENCODER_PREFIXES[0])
}
