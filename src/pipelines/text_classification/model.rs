use super::pipeline::Prediction;
use crate::error::Result;
use tokenizers::Tokenizer;

pub trait TextClassificationModel {
    type Options: std::fmt::Debug + std::fmt::Display + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Score every class the checkpoint knows, in class-id order.
    fn predict_scores(&self, tokenizer: &Tokenizer, text: &str) -> Result<Vec<Prediction>>;

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
