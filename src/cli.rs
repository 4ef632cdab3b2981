//! Command-line options and one-time process setup.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::pipelines::text_classification::{DeviceRequest, EmotionCheckpoint, SentimentCheckpoint};

/// N3 - No Nonsense Nuance: the tone and emotions of a short text file.
///
/// Runs interactively: you are asked for a file name, then whether you want
/// the full emotion breakdown.
#[derive(Debug, Parser)]
#[command(name = "n3", version, about, long_about = None)]
pub struct Cli {
    /// Run the models on this CUDA device instead of the CPU
    #[arg(long, env = "N3_CUDA_DEVICE", value_name = "INDEX")]
    pub cuda: Option<usize>,

    /// Hub repo of the polarity model (a DistilBERT sequence classifier)
    #[arg(long, env = "N3_SENTIMENT_MODEL", value_name = "REPO")]
    pub sentiment_model: Option<String>,

    /// Hub repo of the emotion model (a RoBERTa sequence classifier)
    #[arg(long, env = "N3_EMOTION_MODEL", value_name = "REPO")]
    pub emotion_model: Option<String>,

    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn device(&self) -> DeviceRequest {
        DeviceRequest::from(self.cuda)
    }

    pub fn sentiment_checkpoint(&self) -> SentimentCheckpoint {
        self.sentiment_model
            .clone()
            .map_or_else(SentimentCheckpoint::default, SentimentCheckpoint::Custom)
    }

    pub fn emotion_checkpoint(&self) -> EmotionCheckpoint {
        self.emotion_model
            .clone()
            .map_or_else(EmotionCheckpoint::default, EmotionCheckpoint::Custom)
    }
}

/// Process-wide settings, applied once before any model is loaded.
pub fn configure_process() {
    // Keeps the tokenizer from warning about parallelism on every run.
    std::env::set_var("TOKENIZERS_PARALLELISM", "false");
}

/// Log to stderr so the interactive output on stdout stays clean.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
