//! Single-utterance intent prediction with a DistilBERT classifier.

pub mod classifier;
pub mod config;
pub mod error;
pub mod labels;
pub mod loaders;
pub mod model;
pub mod response;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_support;

pub use classifier::{IntentClassifier, Prediction};
pub use config::{DeviceKind, Settings};
pub use error::{Error, Result};
pub use labels::LabelVocabulary;
