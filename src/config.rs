use crate::error::{Error, Result};
use candle_core::Device;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DeviceKind {
    #[default]
    Cpu,
    Cuda,
    Metal,
}

impl DeviceKind {
    pub fn device(self) -> Result<Device> {
        match self {
            Self::Cpu => Ok(Device::Cpu),
            Self::Cuda => Device::new_cuda(0)
                .map_err(|e| Error::Device(format!("failed to initialize CUDA: {e}"))),
            Self::Metal => Device::new_metal(0)
                .map_err(|e| Error::Device(format!("failed to initialize Metal: {e}"))),
        }
    }
}

pub const DEFAULT_MODEL_DIR: &str = "routes/chatbot";
pub const DEFAULT_WEIGHTS: &str = "intent_model.safetensors";
pub const DEFAULT_LABELS: &str = "label2id.json";
pub const DEFAULT_MAX_LENGTH: usize = 32;
pub const DEFAULT_HUB_REPO: &str = "distilbert-base-uncased";

/// Where the artifacts live and how inputs are shaped.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Directory holding the weights, label vocabulary, encoder config and tokenizer.
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Weight file (safetensors, or a PyTorch state dict).
    #[arg(long, env = "INTENT_WEIGHTS", default_value = DEFAULT_WEIGHTS)]
    pub weights: PathBuf,

    /// JSON object mapping each intent label to its index.
    #[arg(long, env = "INTENT_LABELS", default_value = DEFAULT_LABELS)]
    pub labels: PathBuf,

    /// Tensor prefix of the encoder weights; detected when omitted.
    #[arg(long, env = "INTENT_ENCODER_PREFIX")]
    pub encoder_prefix: Option<String>,

    /// Every input is truncated or padded to this many tokens.
    #[arg(long, env = "INTENT_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    #[arg(long, env = "INTENT_DEVICE", value_enum, default_value_t = DeviceKind::default())]
    pub device: DeviceKind,

    /// Hub repository used for any encoder config or tokenizer missing locally.
    #[arg(long, env = "INTENT_HUB_REPO", default_value = DEFAULT_HUB_REPO)]
    pub hub_repo: String,
}

impl Settings {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            weights: PathBuf::from(DEFAULT_WEIGHTS),
            labels: PathBuf::from(DEFAULT_LABELS),
            encoder_prefix: None,
            max_length: DEFAULT_MAX_LENGTH,
            device: DeviceKind::default(),
            hub_repo: DEFAULT_HUB_REPO.into(),
        }
    }

    /// Resolves `file` against the model directory unless it is absolute.
    pub fn resolve<P: AsRef<Path>>(&self, file: P) -> PathBuf {
        let file = file.as_ref();
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.model_dir.join(file)
        }
    }

    pub fn weights_path(&self) -> PathBuf {
        self.resolve(&self.weights)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.resolve(&self.labels)
    }
}
