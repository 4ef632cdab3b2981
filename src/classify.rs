//! Polarity and emotion classification of a validated document.
//!
//! Both classifiers sit behind [`TextClassifier`], so the inference backend
//! can be swapped (or stubbed) without touching the rest of the program.

use std::path::Path;

use crate::document::read_document;
use crate::error::{N3Error, PipelineError};
use crate::pipelines::text_classification::{
    Prediction, TextClassificationModel, TextClassificationPipeline,
};

/// A text classification capability.
pub trait TextClassifier {
    /// Classify `text`, returning predictions ranked by descending score.
    fn classify(&self, text: &str) -> crate::error::Result<Vec<Prediction>>;
}

impl<M: TextClassificationModel> TextClassifier for TextClassificationPipeline<M> {
    fn classify(&self, text: &str) -> crate::error::Result<Vec<Prediction>> {
        Ok(self.run(text)?.predictions)
    }
}

/// One emotion and how strongly the model detected it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionScore {
    pub label: String,
    pub score: f32,
}

/// Every emotion score for a document, strongest first.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionProfile {
    scores: Vec<EmotionScore>,
}

impl EmotionProfile {
    /// Build a profile, ranking the scores descending. Ties keep their order.
    pub fn new(mut scores: Vec<EmotionScore>) -> Self {
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { scores }
    }

    /// The strongest emotion, if the profile is non-empty.
    pub fn dominant(&self) -> Option<&EmotionScore> {
        self.scores.first()
    }

    pub fn scores(&self) -> &[EmotionScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmotionScore> {
        self.scores.iter()
    }
}

impl<'a> IntoIterator for &'a EmotionProfile {
    type Item = &'a EmotionScore;
    type IntoIter = std::slice::Iter<'a, EmotionScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Prediction> for EmotionScore {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            score: prediction.score,
        }
    }
}

/// Overall polarity of the document at `path`, lowercased.
///
/// Whatever the model ranks first is returned, however low its score.
pub fn classify_polarity(path: &Path, classifier: &impl TextClassifier) -> Result<String, N3Error> {
    let text = read_document(path)?;
    let predictions = classifier.classify(&text)?;

    let top = predictions
        .first()
        .ok_or_else(|| PipelineError::Unexpected("Sentiment model returned no predictions".into()))?;
    tracing::info!(label = %top.label, score = top.score, "polarity");

    Ok(top.label.to_lowercase())
}

/// Dominant emotion (lowercased) and the full ranked profile of the document at `path`.
///
/// The classifier is expected to score every emotion class, not only the top one.
pub fn classify_emotions(
    path: &Path,
    classifier: &impl TextClassifier,
) -> Result<(String, EmotionProfile), N3Error> {
    let text = read_document(path)?;
    let predictions = classifier.classify(&text)?;

    let profile = EmotionProfile::new(predictions.into_iter().map(EmotionScore::from).collect());
    let top = profile
        .dominant()
        .ok_or_else(|| PipelineError::Unexpected("Emotion model returned no predictions".into()))?;
    tracing::info!(label = %top.label, score = top.score, classes = profile.len(), "dominant emotion");
    let dominant = top.label.to_lowercase();

    Ok((dominant, profile))
}
