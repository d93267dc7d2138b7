use crate::config::Settings;
use crate::error::{Error, Result};
use crate::labels::LabelVocabulary;
use crate::loaders;
use crate::model::IntentModel;
use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub intent: String,
    /// Softmax probability of the predicted intent.
    pub score: f32,
}

pub struct IntentClassifier {
    model: IntentModel,
    tokenizer: Tokenizer,
    labels: LabelVocabulary,
    device: Device,
}

impl IntentClassifier {
    pub fn load(settings: &Settings) -> Result<Self> {
        let device = settings.device.device()?;
        let weights = loaders::resolve_weights(settings)?;
        let config = loaders::load_config(settings)?;

        let labels_path = settings.labels_path();
        let labels = if labels_path.is_file() {
            LabelVocabulary::load(&labels_path)?
        } else if let Some(id_to_label) = config.id_to_label.clone() {
            tracing::debug!("no label map, using id2label from the encoder config");
            LabelVocabulary::from_id_to_label(id_to_label)?
        } else {
            return Err(Error::missing(labels_path));
        };

        let tokenizer = loaders::load_tokenizer(settings, &config)?;
        let vb = loaders::load_weights(&weights, &device)?;
        let model = IntentModel::load(
            vb,
            &config,
            labels.len(),
            settings.encoder_prefix.as_deref(),
        )?;

        tracing::debug!(
            weights = %weights.display(),
            labels = labels.len(),
            "intent classifier loaded"
        );
        Ok(Self {
            model,
            tokenizer,
            labels,
            device,
        })
    }

    pub fn labels(&self) -> &LabelVocabulary {
        &self.labels
    }

    pub fn predict(&self, text: &str) -> Result<Prediction> {
        self.predict_batch(&[text])?
            .pop()
            .ok_or_else(|| Error::Unexpected("no prediction returned".into()))
    }

    pub fn predict_batch(&self, texts: &[&str]) -> Result<Vec<Prediction>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let encodings = self.tokenizer.encode_batch(texts.to_vec(), true)?;
        let mut input_ids = Vec::with_capacity(encodings.len());
        let mut padding_masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            input_ids.push(Tensor::new(encoding.get_ids(), &self.device)?);
            let padding: Vec<u8> = encoding
                .get_attention_mask()
                .iter()
                .map(|&attend| u8::from(attend == 0))
                .collect();
            padding_masks.push(Tensor::new(padding.as_slice(), &self.device)?);
        }

        let logits = self.model.forward(
            &Tensor::stack(input_ids.as_slice(), 0)?,
            &Tensor::stack(padding_masks.as_slice(), 0)?,
        )?;
        let probabilities = candle_nn::ops::softmax_last_dim(&logits)?;
        let logits: Vec<Vec<f32>> = logits.to_vec2()?;
        let probabilities: Vec<Vec<f32>> = probabilities.to_vec2()?;

        logits
            .iter()
            .zip(probabilities)
            .map(|(row, probabilities)| {
                let index = argmax(row)
                    .ok_or_else(|| Error::Unexpected("model returned no logits".into()))?;
                let intent = self.labels.label(index).ok_or_else(|| {
                    Error::Unexpected(format!("no label for predicted index {index}"))
                })?;
                Ok(Prediction {
                    index,
                    intent: intent.to_string(),
                    score: probabilities[index],
                })
            })
            .collect()
    }
}

/// Index of the first largest value. NaN never wins over a number.
fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if !(v > b || (b.is_nan() && !v.is_nan())) => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
