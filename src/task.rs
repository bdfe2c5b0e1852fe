use crate::error::Result;
use crate::pipeline::PreprocessedTensor;

/// A loaded classifier, shared read-only between predictions.
pub trait Classifier: Send + Sync {
    /// Runs one forward pass and returns the raw output vector.
    fn classify(&self, input: &PreprocessedTensor) -> Result<Vec<f32>>;
}
