use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Intent names indexed by the position of their logit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    /// Reads a `{"label": index}` JSON object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Artifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let label_to_id: HashMap<String, usize> = serde_json::from_reader(BufReader::new(file))?;
        Self::from_label_to_id(label_to_id)
    }

    pub fn from_label_to_id(label_to_id: HashMap<String, usize>) -> Result<Self> {
        Self::from_pairs(label_to_id.into_iter().map(|(label, id)| (id, label)))
    }

    /// Builds the vocabulary from a Hugging Face style `id2label` table, whose
    /// keys are stringified indices.
    pub fn from_id_to_label(id_to_label: HashMap<String, String>) -> Result<Self> {
        let pairs = id_to_label
            .into_iter()
            .map(|(id, label)| {
                id.trim()
                    .parse::<usize>()
                    .map(|id| (id, label))
                    .map_err(|_| Error::Labels(format!("'{id}' is not a label index")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_pairs(pairs)
    }

    fn from_pairs(pairs: impl IntoIterator<Item = (usize, String)>) -> Result<Self> {
        let mut pairs: Vec<(usize, String)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(Error::Labels("no labels".into()));
        }
        pairs.sort_by_key(|(id, _)| *id);

        let mut seen = HashSet::with_capacity(pairs.len());
        let mut labels = Vec::with_capacity(pairs.len());
        for (expected, (id, label)) in pairs.into_iter().enumerate() {
            if id != expected {
                return Err(Error::Labels(format!(
                    "expected index {expected} but found {id} (for '{label}')"
                )));
            }
            if !seen.insert(label.clone()) {
                return Err(Error::Labels(format!("duplicate label '{label}'")));
            }
            labels.push(label);
        }
        Ok(Self { labels })
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
