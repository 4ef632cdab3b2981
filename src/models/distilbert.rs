use candle_core::{Device, IndexOp, Module, Tensor};
use candle_nn::{linear, Linear};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use serde::Deserialize;
use tokenizers::Tokenizer;

use crate::error::Result;
use crate::loaders::{ClassifierLoader, TokenizerFallback, TokenizerLoader};
use crate::pipelines::text_classification::{Prediction, TextClassificationModel};

/// Pretrained DistilBERT polarity checkpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentimentCheckpoint {
    /// DistilBERT fine-tuned on SST-2 (English, `POSITIVE` / `NEGATIVE`).
    Sst2English,
    /// Any DistilBERT sequence-classification repo on the Hub.
    Custom(String),
}

impl SentimentCheckpoint {
    pub fn repo_id(&self) -> &str {
        match self {
            SentimentCheckpoint::Sst2English => {
                "distilbert/distilbert-base-uncased-finetuned-sst-2-english"
            }
            SentimentCheckpoint::Custom(repo) => repo,
        }
    }
}

impl Default for SentimentCheckpoint {
    fn default() -> Self {
        SentimentCheckpoint::Sst2English
    }
}

impl std::fmt::Display for SentimentCheckpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repo_id())
    }
}

#[derive(Deserialize)]
struct HeadDims {
    dim: usize,
}

/// DistilBERT encoder with the `pre_classifier` / `classifier` head used by
/// `DistilBertForSequenceClassification`.
pub struct SentimentDistilBertModel {
    encoder: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    labels: Vec<String>,
    multi_label: bool,
    device: Device,
}

impl SentimentDistilBertModel {
    pub fn new(checkpoint: SentimentCheckpoint, device: Device) -> Result<Self> {
        let loaded = ClassifierLoader::new(checkpoint.repo_id()).load(&device)?;

        let config: Config = serde_json::from_str(&loaded.config_json)?;
        let dims: HeadDims = serde_json::from_str(&loaded.config_json)?;
        let labels = loaded.classifier.labels();

        let encoder = DistilBertModel::load(loaded.vb.pp("distilbert"), &config)?;
        let pre_classifier = linear(dims.dim, dims.dim, loaded.vb.pp("pre_classifier"))?;
        let classifier = linear(dims.dim, labels.len(), loaded.vb.pp("classifier"))?;

        Ok(Self {
            encoder,
            pre_classifier,
            classifier,
            multi_label: loaded.classifier.is_multi_label(),
            labels,
            device,
        })
    }

    fn logits(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        // The encoder masks positions whose mask entry is non-zero.
        let (batch, seq_len) = attention_mask.dims2()?;
        let padding_mask = attention_mask.eq(0u32)?.reshape((batch, 1, 1, seq_len))?;

        let hidden = self.encoder.forward(input_ids, &padding_mask)?;
        let pooled = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&pooled)?.relu()?;
        Ok(self.classifier.forward(&pooled)?)
    }
}

impl TextClassificationModel for SentimentDistilBertModel {
    type Options = SentimentCheckpoint;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentDistilBertModel::new(options, device)
    }

    fn predict_scores(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<Prediction>> {
        let (input_ids, attention_mask) = super::encode(tokenizer, text, &self.device)?;
        let logits = self.logits(&input_ids, &attention_mask)?;
        super::scores_from_logits(&logits, &self.labels, self.multi_label)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        TokenizerLoader::new(options.repo_id(), TokenizerFallback::WordPiece).load()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_checkpoint_is_sst2() {
        assert_eq!(
            SentimentCheckpoint::default().to_string(),
            "distilbert/distilbert-base-uncased-finetuned-sst-2-english"
        );
    }

    #[test]
    fn custom_checkpoint_uses_given_repo() {
        let checkpoint = SentimentCheckpoint::Custom("someone/distilbert-imdb".into());
        assert_eq!(checkpoint.repo_id(), "someone/distilbert-imdb");
    }
}
