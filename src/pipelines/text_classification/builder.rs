use super::model::TextClassificationModel;
use super::pipeline::TextClassificationPipeline;
use crate::error::Result;
use crate::pipelines::utils::{BasePipelineBuilder, DeviceRequest, StandardPipelineBuilder};

crate::pipelines::utils::impl_device_methods!(delegated: TextClassificationPipelineBuilder<M: TextClassificationModel>);

/// Builder for creating [`TextClassificationPipeline`] instances.
///
/// Use [`Self::distilbert_sentiment`] or [`Self::roberta_emotion`] as the entry point.
///
/// # Examples
///
/// ```rust,no_run
/// # use no_nonsense_nuance::text_classification::{SentimentCheckpoint, TextClassificationPipelineBuilder};
/// # fn main() -> no_nonsense_nuance::error::Result<()> {
/// let pipeline = TextClassificationPipelineBuilder::distilbert_sentiment(SentimentCheckpoint::Sst2English)
///     .cpu()
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct TextClassificationPipelineBuilder<M: TextClassificationModel>(
    StandardPipelineBuilder<M::Options>,
    Option<usize>,
);

impl<M: TextClassificationModel> TextClassificationPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options), Some(1))
    }

    /// How many ranked predictions each run returns. `None` returns every class.
    ///
    /// Defaults to `Some(1)`.
    pub fn top_k(mut self, top_k: Option<usize>) -> Self {
        self.1 = top_k;
        self
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if downloading, model loading or device initialization fails.
    pub fn build(self) -> Result<TextClassificationPipeline<M>> {
        BasePipelineBuilder::build(self)
    }
}

impl<M: TextClassificationModel> BasePipelineBuilder<M> for TextClassificationPipelineBuilder<M> {
    type Pipeline = TextClassificationPipeline<M>;
    type Options = M::Options;

    fn options(&self) -> &Self::Options {
        &self.0.options
    }

    fn device_request(&self) -> &DeviceRequest {
        &self.0.device_request
    }

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M> {
        M::new(options, device)
    }

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer> {
        M::get_tokenizer(options)
    }

    fn construct_pipeline(
        self,
        model: M,
        tokenizer: tokenizers::Tokenizer,
    ) -> Result<Self::Pipeline> {
        Ok(TextClassificationPipeline {
            model,
            tokenizer,
            top_k: self.1,
        })
    }
}

impl TextClassificationPipelineBuilder<super::SentimentDistilBert> {
    /// Creates a builder for a DistilBERT polarity classifier.
    pub fn distilbert_sentiment(checkpoint: crate::models::SentimentCheckpoint) -> Self {
        Self::new(checkpoint)
    }
}

impl TextClassificationPipelineBuilder<super::EmotionRoberta> {
    /// Creates a builder for a RoBERTa emotion classifier.
    pub fn roberta_emotion(checkpoint: crate::models::EmotionCheckpoint) -> Self {
        Self::new(checkpoint)
    }
}
