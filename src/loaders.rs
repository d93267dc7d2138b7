use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::Config;
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use std::path::{Path, PathBuf};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const VOCAB_FILE: &str = "vocab.txt";
const PTH_EXTENSIONS: [&str; 3] = ["pt", "pth", "bin"];

/// Fetches a single file from a Hugging Face model repository, using the local cache.
pub fn hub_file(repo: &str, filename: &str) -> Result<PathBuf> {
    tracing::info!(repo, filename, "fetching from HuggingFace hub");
    let api = hf_hub::api::sync::Api::new()?;
    let path = api.model(repo.to_string()).get(filename).map_err(|e| {
        Error::Download(format!("failed to download '{filename}' from '{repo}': {e}"))
    })?;
    Ok(path)
}

pub fn load_config(settings: &Settings) -> Result<Config> {
    let local = settings.resolve(CONFIG_FILE);
    let path = if local.is_file() {
        local
    } else {
        hub_file(&settings.hub_repo, CONFIG_FILE)?
    };
    tracing::debug!(path = %path.display(), "reading encoder config");
    Config::load(path)
}

/// Loads the tokenizer and fixes every encoding to `settings.max_length` tokens.
pub fn load_tokenizer(settings: &Settings, config: &Config) -> Result<Tokenizer> {
    let json = settings.resolve(TOKENIZER_FILE);
    let vocab = settings.resolve(VOCAB_FILE);
    let mut tokenizer = if json.is_file() {
        Tokenizer::from_file(&json)?
    } else if vocab.is_file() {
        wordpiece_from_vocab(&vocab)?
    } else {
        Tokenizer::from_file(hub_file(&settings.hub_repo, TOKENIZER_FILE)?)?
    };

    let pad_token = tokenizer
        .id_to_token(config.pad_token_id)
        .unwrap_or_else(|| "[PAD]".to_string());
    tokenizer
        .with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(settings.max_length),
            pad_id: config.pad_token_id,
            pad_token,
            ..Default::default()
        }))
        .with_truncation(Some(TruncationParams {
            max_length: settings.max_length,
            ..Default::default()
        }))?;
    Ok(tokenizer)
}

/// Builds an uncased BERT WordPiece tokenizer from a `vocab.txt` file.
pub fn wordpiece_from_vocab(path: &Path) -> Result<Tokenizer> {
    let wordpiece = WordPiece::from_file(&path.to_string_lossy())
        .unk_token("[UNK]".to_string())
        .build()?;
    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));

    let special = |token: &str| {
        tokenizer
            .token_to_id(token)
            .map(|id| (token.to_string(), id))
            .ok_or_else(|| Error::Tokenizer(format!("'{token}' missing from {}", path.display())))
    };
    let sep = special("[SEP]")?;
    let cls = special("[CLS]")?;
    tokenizer.with_post_processor(Some(BertProcessing::new(sep, cls)));
    Ok(tokenizer)
}

/// Picks the weight file: the configured one, or a PyTorch file with the same stem.
pub fn resolve_weights(settings: &Settings) -> Result<PathBuf> {
    let configured = settings.weights_path();
    if configured.is_file() {
        return Ok(configured);
    }
    let fallback = PTH_EXTENSIONS
        .iter()
        .map(|ext| configured.with_extension(ext))
        .find(|candidate| candidate.is_file());
    fallback.ok_or_else(|| Error::missing(configured))
}

pub fn load_weights(path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let is_pth = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PTH_EXTENSIONS.contains(&ext));
    tracing::debug!(path = %path.display(), is_pth, "loading weights");
    let vb = if is_pth {
        VarBuilder::from_pth(path, DType::F32, device)?
    } else {
        // SAFETY: the file is only read, and nothing in this process writes it.
        unsafe { VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)? }
    };
    Ok(vb)
}
