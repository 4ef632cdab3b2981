//! Text classification pipeline.
//!
//! Run a pretrained sequence classifier over a text and get its classes back
//! ranked by confidence. Two checkpoint families are wired in: a DistilBERT
//! polarity model (`positive` / `negative`) and a RoBERTa emotion model
//! (anger, disgust, fear, joy, neutral, sadness, surprise).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use no_nonsense_nuance::text_classification::{SentimentCheckpoint, TextClassificationPipelineBuilder};
//!
//! # fn main() -> no_nonsense_nuance::error::Result<()> {
//! let pipeline =
//!     TextClassificationPipelineBuilder::distilbert_sentiment(SentimentCheckpoint::Sst2English).build()?;
//!
//! let output = pipeline.run("I absolutely love this book!")?;
//! if let Some(top) = output.top() {
//!     println!("sentiment: {} (confidence: {:.2})", top.label, top.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # All Scores
//!
//! `top_k(None)` returns every class, which is how the emotion profile is read:
//!
//! ```rust,no_run
//! # use no_nonsense_nuance::text_classification::{EmotionCheckpoint, TextClassificationPipelineBuilder};
//! # fn main() -> no_nonsense_nuance::error::Result<()> {
//! let pipeline = TextClassificationPipelineBuilder::roberta_emotion(EmotionCheckpoint::EnglishDistilRoberta)
//!     .top_k(None)
//!     .build()?;
//!
//! let output = pipeline.run("The storm knocked the power out again.")?;
//! assert_eq!(output.predictions.len(), 7);
//! # Ok(())
//! # }
//! ```
//!
//! # Supported Models
//!
//! | Model | Checkpoints | Builder Method |
//! |-------|-------------|----------------|
//! | DistilBERT | `Sst2English`, `Custom` | [`TextClassificationPipelineBuilder::distilbert_sentiment`] |
//! | RoBERTa | `EnglishDistilRoberta`, `Custom` | [`TextClassificationPipelineBuilder::roberta_emotion`] |

// ============ Internal API ============

pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod pipeline;

// ============ Public API ============

pub use crate::models::{EmotionCheckpoint, SentimentCheckpoint};
pub use crate::pipelines::stats::PipelineStats;
pub use crate::pipelines::utils::DeviceRequest;
pub use builder::TextClassificationPipelineBuilder;
pub use model::TextClassificationModel;
pub use pipeline::{Output, Prediction, TextClassificationPipeline};

/// Only for generic annotations. Use [`TextClassificationPipelineBuilder::distilbert_sentiment`].
pub type SentimentDistilBert = crate::models::distilbert::SentimentDistilBertModel;

/// Only for generic annotations. Use [`TextClassificationPipelineBuilder::roberta_emotion`].
pub type EmotionRoberta = crate::models::roberta::EmotionRobertaModel;
