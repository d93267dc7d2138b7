use clap::Parser;
use intent_classifier::response::{input_text, ErrorResponse, IntentResponse};
use intent_classifier::{IntentClassifier, Settings};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Predict the intent of one utterance and print it as JSON.
///
/// Options must come before the text. The first argument that is not an
/// option is classified and any after it are ignored. Text that spells one of
/// the options goes after `--`.
#[derive(Parser, Debug)]
#[command(about, disable_help_flag = true)]
struct Cli {
    /// Text to classify.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    text: Vec<String>,

    #[command(flatten)]
    settings: Settings,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let Some(text) = input_text(cli.text.into_iter().next()) else {
        emit(&ErrorResponse::no_input());
        return ExitCode::from(1);
    };

    match classify(&cli.settings, &text) {
        Ok(intent) => {
            emit(&IntentResponse { intent });
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn classify(settings: &Settings, text: &str) -> intent_classifier::Result<String> {
    tracing::info!(text, "received text");
    let classifier = IntentClassifier::load(settings)?;
    let prediction = classifier.predict(text)?;
    tracing::info!(
        index = prediction.index,
        score = prediction.score,
        "predicted intent"
    );
    Ok(prediction.intent)
}

fn emit<T: Serialize>(payload: &T) {
    match serde_json::to_string(payload) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!("failed to serialize response: {e}"),
    }
}

// Stdout carries only the JSON payload, so logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
