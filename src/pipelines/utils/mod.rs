use crate::error::{PipelineError, Result};
use candle_core::Device;

pub mod builder;
pub use builder::{BasePipelineBuilder, StandardPipelineBuilder};

/// Where a pipeline should run its model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceRequest {
    #[default]
    Cpu,
    Cuda(usize),
}

impl DeviceRequest {
    pub fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => Device::new_cuda(i).map_err(|e| {
                PipelineError::Device(format!(
                    "Failed to init CUDA device {i}: {e}. Try CPU as fallback."
                ))
            }),
        }
    }
}

impl From<Option<usize>> for DeviceRequest {
    fn from(cuda_index: Option<usize>) -> Self {
        cuda_index.map_or(DeviceRequest::Cpu, DeviceRequest::Cuda)
    }
}

macro_rules! impl_device_methods {
    (delegated: $builder:ident < $($gen:ident : $bound:path),* >) => {
        impl<$($gen: $bound),*> $builder<$($gen),*> {
            /// Use CPU for inference (default).
            pub fn cpu(mut self) -> Self {
                *self.0.device_request_mut() = crate::pipelines::utils::DeviceRequest::Cpu;
                self
            }

            /// Use a specific CUDA GPU for inference.
            pub fn cuda(mut self, index: usize) -> Self {
                *self.0.device_request_mut() = crate::pipelines::utils::DeviceRequest::Cuda(index);
                self
            }

            /// Use whichever device the request names.
            pub fn device(mut self, request: crate::pipelines::utils::DeviceRequest) -> Self {
                *self.0.device_request_mut() = request;
                self
            }
        }
    };
}

pub(crate) use impl_device_methods;
