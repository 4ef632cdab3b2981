use candle_core::{Device, Tensor};
use candle_transformers::models::xlm_roberta::{Config, XLMRobertaForSequenceClassification};
use serde_json::{json, Value};
use tokenizers::Tokenizer;

use crate::error::{PipelineError, Result};
use crate::loaders::{ClassifierLoader, TokenizerFallback, TokenizerLoader};
use crate::pipelines::text_classification::{Prediction, TextClassificationModel};

/// Pretrained RoBERTa emotion checkpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmotionCheckpoint {
    /// DistilRoBERTa fine-tuned on Ekman's six emotions plus neutral.
    EnglishDistilRoberta,
    /// Any RoBERTa sequence-classification repo on the Hub.
    Custom(String),
}

impl EmotionCheckpoint {
    pub fn repo_id(&self) -> &str {
        match self {
            EmotionCheckpoint::EnglishDistilRoberta => "j-hartmann/emotion-english-distilroberta-base",
            EmotionCheckpoint::Custom(repo) => repo,
        }
    }
}

impl Default for EmotionCheckpoint {
    fn default() -> Self {
        EmotionCheckpoint::EnglishDistilRoberta
    }
}

impl std::fmt::Display for EmotionCheckpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repo_id())
    }
}

pub struct EmotionRobertaModel {
    model: XLMRobertaForSequenceClassification,
    labels: Vec<String>,
    multi_label: bool,
    device: Device,
}

impl EmotionRobertaModel {
    pub fn new(checkpoint: EmotionCheckpoint, device: Device) -> Result<Self> {
        let loaded = ClassifierLoader::new(checkpoint.repo_id()).load(&device)?;

        let config = parse_config(&loaded.config_json)?;
        let labels = loaded.classifier.labels();
        let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, loaded.vb)?;

        Ok(Self {
            model,
            multi_label: loaded.classifier.is_multi_label(),
            labels,
            device,
        })
    }
}

/// Older RoBERTa configs omit fields the encoder config requires; fill in the
/// values `transformers` assumes for them.
fn parse_config(config_json: &str) -> Result<Config> {
    let mut raw: Value = serde_json::from_str(config_json)?;
    let fields = raw.as_object_mut().ok_or_else(|| {
        PipelineError::Unexpected("Checkpoint config.json is not a JSON object".into())
    })?;

    for (key, default) in [
        ("position_embedding_type", json!("absolute")),
        ("type_vocab_size", json!(1)),
        ("layer_norm_eps", json!(1e-5)),
        ("pad_token_id", json!(1)),
        ("attention_probs_dropout_prob", json!(0.1)),
        ("hidden_dropout_prob", json!(0.1)),
    ] {
        fields.entry(key).or_insert(default);
    }

    Ok(serde_json::from_value(raw)?)
}

impl TextClassificationModel for EmotionRobertaModel {
    type Options = EmotionCheckpoint;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        EmotionRobertaModel::new(options, device)
    }

    fn predict_scores(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<Prediction>> {
        let (input_ids, attention_mask) = super::encode(tokenizer, text, &self.device)?;
        let token_type_ids = Tensor::zeros_like(&input_ids)?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)?;
        super::scores_from_logits(&logits, &self.labels, self.multi_label)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        TokenizerLoader::new(options.repo_id(), TokenizerFallback::ByteLevelBpe).load()
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPARSE_CONFIG: &str = r#"{
        "architectures": ["RobertaForSequenceClassification"],
        "hidden_size": 768,
        "num_attention_heads": 12,
        "num_hidden_layers": 6,
        "intermediate_size": 3072,
        "hidden_act": "gelu",
        "vocab_size": 50265,
        "max_position_embeddings": 514,
        "id2label": {"0": "anger", "1": "disgust"}
    }"#;

    #[test]
    fn missing_encoder_fields_get_defaults() {
        let config = parse_config(SPARSE_CONFIG).unwrap();
        assert_eq!(config.type_vocab_size, 1);
        assert_eq!(config.position_embedding_type, "absolute");
        assert_eq!(config.pad_token_id, 1);
    }

    #[test]
    fn non_object_config_is_rejected() {
        assert!(matches!(
            parse_config("[1, 2, 3]"),
            Err(PipelineError::Unexpected(_))
        ));
    }

    #[test]
    fn default_checkpoint_is_english_distilroberta() {
        assert_eq!(
            EmotionCheckpoint::default().repo_id(),
            "j-hartmann/emotion-english-distilroberta-base"
        );
    }
}
