//! Error types for this crate.
//!
//! Inference code returns [`Result<T>`], which uses [`PipelineError`]. The
//! interactive application layer wraps those in [`N3Error`], whose `Display`
//! output is the message shown to the user before the program exits.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while loading or running a classification model.
///
/// # Example
///
/// ```rust,no_run
/// use no_nonsense_nuance::error::PipelineError;
///
/// fn handle_error(e: PipelineError) {
///     match &e {
///         PipelineError::Download(_) => {
///             // Network issue - retry with backoff
///         }
///         PipelineError::Device(_) => {
///             // GPU unavailable - fall back to CPU
///         }
///         PipelineError::Tokenization(_) => {
///             // Bad input or broken tokenizer files
///         }
///         PipelineError::Unexpected(_) => {
///             eprintln!("Internal error: {e}");
///         }
///         _ => {}
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Network or download failure. Retry may help.
    #[error("{0}")]
    Download(String),

    /// Tokenization failure. Check input text.
    #[error("{0}")]
    Tokenization(String),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// Internal error, including a checkpoint that breaks its own config.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {}", value))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

/// Every way a run of N3 can end early.
///
/// All variants are fatal to the run: the binary prints the message and exits.
#[derive(Error, Debug)]
pub enum N3Error {
    /// The filename does not carry the `.txt` extension.
    #[error(":( Not a .txt file. Please reload the program.")]
    InvalidFileType,

    /// The file could not be opened or read.
    #[error(":( File does not exist in this folder. Please reload the program.")]
    FileNotFound,

    /// The document holds more words than the models can take in one pass.
    #[error(":( Passage is too long: Max length of 500 words. Please reload the program.")]
    DocumentTooLong {
        /// Word count of the rejected document.
        words: usize,
    },

    /// The emotion model produced a label outside the seven known emotions.
    #[error(":( The emotion model returned an unknown label '{0}'. Please reload the program.")]
    UnknownEmotionLabel(String),

    /// Model download, load or inference failed.
    #[error(":( Could not analyse your text: {0}")]
    Inference(#[from] PipelineError),

    /// Reading from or writing to the terminal failed.
    #[error(":( Lost contact with the terminal: {0}")]
    Console(#[from] std::io::Error),
}
