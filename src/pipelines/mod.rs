pub mod stats;
pub mod utils;

pub mod text_classification;
