use std::path::{Path, PathBuf};

/// Side of the square canvas the network was trained on.
pub const INPUT_SIDE: u32 = 64;
pub const INPUT_CHANNELS: usize = 3;
/// `(batch, height, width, channels)`
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIDE as usize, INPUT_SIDE as usize, INPUT_CHANNELS];

pub const DEFAULT_MODEL_RESOURCE: &str = "models/classifier.onnx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Model path relative to the resource directory (or the working directory).
    pub model_resource: PathBuf,
    /// ONNX Runtime intra-op threads, `None` leaves the runtime default.
    pub intra_threads: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_resource: PathBuf::from(DEFAULT_MODEL_RESOURCE),
            intra_threads: None,
        }
    }
}

impl AppConfig {
    /// Prefers the bundled resource, falls back to the working directory.
    pub fn resolve_model_path(&self, resource_dir: Option<&Path>) -> PathBuf {
        if let Some(bundled) = resource_dir
            .map(|dir| dir.join(&self.model_resource))
            .filter(|path| path.is_file())
        {
            return bundled;
        }
        self.model_resource.clone()
    }
}
