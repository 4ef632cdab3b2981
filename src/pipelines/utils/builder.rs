use super::DeviceRequest;
use crate::error::Result;

/// Shared build sequence: resolve the device, load the model, load the tokenizer.
pub trait BasePipelineBuilder<M>: Sized {
    type Pipeline;

    type Options: std::fmt::Display + Clone;

    fn options(&self) -> &Self::Options;

    fn device_request(&self) -> &DeviceRequest;

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M>;

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer>;

    fn construct_pipeline(self, model: M, tokenizer: tokenizers::Tokenizer)
        -> Result<Self::Pipeline>;

    fn build(self) -> Result<Self::Pipeline> {
        let device = self.device_request().resolve()?;

        tracing::info!(model = %self.options(), device = ?device.location(), "loading model");
        let model = Self::create_model(self.options().clone(), device)?;
        let tokenizer = Self::get_tokenizer(self.options().clone())?;

        self.construct_pipeline(model, tokenizer)
    }
}

pub struct StandardPipelineBuilder<Opts> {
    pub(crate) options: Opts,
    pub(crate) device_request: DeviceRequest,
}

impl<Opts> StandardPipelineBuilder<Opts> {
    pub fn new(options: Opts) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Cpu,
        }
    }

    pub(crate) fn device_request_mut(&mut self) -> &mut DeviceRequest {
        &mut self.device_request
    }
}
