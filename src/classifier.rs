use std::path::Path;
use std::sync::Mutex;

use ort::inputs;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::TensorRef;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::pipeline::PreprocessedTensor;
use crate::task::Classifier;

/// Classifier backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct OnnxClassifier {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, &AppConfig::default())
    }

    pub fn load_with(path: &Path, config: &AppConfig) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ModelLoad(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let session = Self::build_session(path, config)
            .map_err(|err| Error::ModelLoad(format!("{}: {err}", path.display())))?;

        if session.inputs.len() != 1 {
            return Err(Error::ModelLoad(format!(
                "expected a single image input, the model has {}",
                session.inputs.len()
            )));
        }
        if session.outputs.is_empty() {
            return Err(Error::ModelLoad("the model has no outputs".to_string()));
        }

        info!(
            "Model loaded from {} (input `{}`, output `{}`)",
            path.display(),
            session.inputs[0].name,
            session.outputs[0].name
        );

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn build_session(path: &Path, config: &AppConfig) -> ort::Result<Session> {
        // Without an explicit thread count the runtime sizes its own pool
        let mut builder =
            Session::builder()?.with_optimization_level(GraphOptimizationLevel::Level3)?;
        if let Some(threads) = config.intra_threads {
            builder = builder.with_intra_threads(threads)?;
        }
        builder.commit_from_file(path)
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, input: &PreprocessedTensor) -> Result<Vec<f32>> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Inference("model session lock poisoned".to_string()))?;

        let outputs = session.run(inputs![TensorRef::from_array_view(input.view())?])?;
        let output = outputs[0].try_extract_array::<f32>()?;
        debug!("Model output shape {:?}", output.shape());

        Ok(output.iter().copied().collect())
    }
}
