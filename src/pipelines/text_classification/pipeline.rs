use super::model::TextClassificationModel;
use crate::error::Result;
use crate::pipelines::stats::PipelineStats;
use tokenizers::Tokenizer;

// ============ Output types ============

/// A class label with its confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Label as spelled in the checkpoint config (e.g. `POSITIVE`, `joy`).
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

/// Output from [`TextClassificationPipeline::run`].
#[derive(Debug)]
pub struct Output {
    /// Labels ranked by descending score, cut to the pipeline's `top_k`.
    pub predictions: Vec<Prediction>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

impl Output {
    /// Highest-scoring prediction, if any.
    pub fn top(&self) -> Option<&Prediction> {
        self.predictions.first()
    }
}

// ============ Pipeline ============

/// Classifies a text into the classes of a pretrained checkpoint.
///
/// Construct with [`TextClassificationPipelineBuilder`](super::TextClassificationPipelineBuilder).
///
/// # Examples
///
/// ```rust,no_run
/// # use no_nonsense_nuance::text_classification::{EmotionCheckpoint, TextClassificationPipelineBuilder};
/// # fn main() -> no_nonsense_nuance::error::Result<()> {
/// let pipeline = TextClassificationPipelineBuilder::roberta_emotion(EmotionCheckpoint::EnglishDistilRoberta)
///     .top_k(None)
///     .build()?;
///
/// let output = pipeline.run("I can't believe we won!")?;
/// for p in &output.predictions {
///     println!("{}: {:.3}", p.label, p.score);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TextClassificationPipeline<M: TextClassificationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) top_k: Option<usize>,
}

impl<M: TextClassificationModel> TextClassificationPipeline<M> {
    /// Classify `text`, returning ranked predictions.
    pub fn run(&self, text: &str) -> Result<Output> {
        let stats_builder = PipelineStats::start();

        let scores = self.model.predict_scores(&self.tokenizer, text)?;
        let predictions = rank(scores, self.top_k);

        let stats = stats_builder.finish(1);
        tracing::debug!(
            device = ?self.device().location(),
            elapsed_ms = stats.total_time.as_secs_f64() * 1000.0,
            per_text_ms = stats.time_per_item().as_secs_f64() * 1000.0,
            classes = predictions.len(),
            "classified text"
        );

        Ok(Output { predictions, stats })
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

/// Sort descending by score (stable, so ties keep class order) and truncate.
pub(crate) fn rank(mut scores: Vec<Prediction>, top_k: Option<usize>) -> Vec<Prediction> {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(k) = top_k {
        scores.truncate(k);
    }
    scores
}
