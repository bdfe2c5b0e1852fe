pub mod classifier;
pub mod config;
pub mod error;
pub mod labels;
pub mod pipeline;
pub mod task;
pub mod upload;
pub mod utils;

pub use classifier::OnnxClassifier;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use labels::CancerClass;
pub use pipeline::{predict, preprocess, InferencePipeline, PredictionResult, PreprocessedTensor};
pub use task::Classifier;

/// Loads the classifier artifact. Call once and share the handle.
pub fn load_model(path: &std::path::Path) -> Result<OnnxClassifier> {
    OnnxClassifier::load(path)
}
