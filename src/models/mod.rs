// ============ Model implementations ============

pub(crate) mod distilbert;
pub(crate) mod roberta;

// Public checkpoint selectors (for builder entry points)
pub use distilbert::SentimentCheckpoint;
pub use roberta::EmotionCheckpoint;

use candle_core::{Device, Tensor, D};
use candle_nn::ops::{sigmoid, softmax};
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::pipelines::text_classification::Prediction;

/// Token ids and attention mask for one text, each shaped `(1, seq_len)`.
pub(crate) fn encode(tokenizer: &Tokenizer, text: &str, device: &Device) -> Result<(Tensor, Tensor)> {
    let encoding = tokenizer.encode(text, true).map_err(|e| {
        PipelineError::Tokenization(format!(
            "Tokenization failed on '{}': {}",
            &text.chars().take(50).collect::<String>(),
            e
        ))
    })?;

    if !encoding.get_overflowing().is_empty() {
        tracing::warn!(
            max_tokens = crate::loaders::MAX_SEQUENCE_TOKENS,
            "input truncated to the model window"
        );
    }

    let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
    let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;
    Ok((input_ids, attention_mask))
}

/// Turn `(1, num_labels)` logits into per-class scores in class-id order.
///
/// Multi-label checkpoints score each class independently with a sigmoid;
/// everything else gets a softmax across classes.
pub(crate) fn scores_from_logits(
    logits: &Tensor,
    labels: &[String],
    multi_label: bool,
) -> Result<Vec<Prediction>> {
    let logits = logits.squeeze(0)?;
    let probs = if multi_label {
        sigmoid(&logits)?
    } else {
        softmax(&logits, D::Minus1)?
    };
    let probs = probs.to_vec1::<f32>()?;

    if probs.len() != labels.len() {
        return Err(PipelineError::Unexpected(format!(
            "Model produced {} scores but its config names {} labels",
            probs.len(),
            labels.len()
        )));
    }

    Ok(labels
        .iter()
        .zip(probs)
        .map(|(label, score)| Prediction {
            label: label.clone(),
            score,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn softmax_scores_sum_to_one() {
        let logits = Tensor::new(&[[2.0f32, 0.0, -1.0]], &Device::Cpu).unwrap();
        let scores = scores_from_logits(&logits, &labels(&["a", "b", "c"]), false).unwrap();

        let total: f32 = scores.iter().map(|p| p.score).sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert_eq!(scores[0].label, "a");
        assert!(scores[0].score > scores[1].score);
    }

    #[test]
    fn sigmoid_scores_are_independent() {
        let logits = Tensor::new(&[[0.0f32, 0.0]], &Device::Cpu).unwrap();
        let scores = scores_from_logits(&logits, &labels(&["x", "y"]), true).unwrap();

        assert!((scores[0].score - 0.5).abs() < 1e-6);
        assert!((scores[1].score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn label_count_mismatch_is_rejected() {
        let logits = Tensor::new(&[[1.0f32, 2.0]], &Device::Cpu).unwrap();
        let err = scores_from_logits(&logits, &labels(&["only"]), false).unwrap_err();
        assert!(matches!(err, PipelineError::Unexpected(_)));
    }
}
