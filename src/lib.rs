//! N3 (No Nonsense Nuance): a reading-comprehension assistant.
//!
//! Reads a short `.txt` file, runs it through a pretrained polarity model and
//! a pretrained emotion model, and reports the overall tone, the dominant
//! emotion and a per-emotion percentage breakdown.
//!
//! Inference runs locally on [Candle](https://github.com/huggingface/candle)
//! through [`text_classification`], with an API modelled on Python's
//! `transformers.pipeline("text-classification")`.

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod classify;
pub mod cli;
pub mod document;
pub mod error;
pub mod prompt;
pub mod report;
pub mod session;

pub use pipelines::text_classification;
