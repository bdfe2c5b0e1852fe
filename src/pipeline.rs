use std::path::Path;
use std::sync::Arc;

use fast_image_resize::{ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage};
use ndarray::{Array4, ArrayView4};
use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::OnnxClassifier;
use crate::config::{AppConfig, INPUT_SHAPE, INPUT_SIDE};
use crate::error::{Error, Result};
use crate::labels::{CancerClass, CLASS_COUNT};
use crate::task::Classifier;
use crate::upload::decode_upload;

/// Slack allowed above 1.0 for a softmax computed in `f32`.
const PROBABILITY_TOLERANCE: f32 = 1e-4;

/// Model input of shape `(1, 64, 64, 3)`, NHWC, raw `0..=255` pixel values.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedTensor(Array4<f32>);

impl PreprocessedTensor {
    pub fn from_array(array: Array4<f32>) -> Result<Self> {
        if array.shape() != INPUT_SHAPE {
            return Err(Error::Inference(format!(
                "expected an input of shape {INPUT_SHAPE:?}, got {:?}",
                array.shape()
            )));
        }
        Ok(Self(array.as_standard_layout().into_owned()))
    }

    pub fn view(&self) -> ArrayView4<'_, f32> {
        self.0.view()
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }
}

/// Decodes raw upload bytes and turns them into the model input.
pub fn preprocess(bytes: &[u8]) -> Result<PreprocessedTensor> {
    let image = decode_upload(bytes)?;
    preprocess_image(&image)
}

/// Stretches the image to 64x64 (the aspect ratio is not kept) with
/// nearest-neighbour sampling and keeps pixel values unnormalized.
pub fn preprocess_image(image: &DynamicImage) -> Result<PreprocessedTensor> {
    let resized = resize_to_input(image)?;
    let pixels = resized.into_raw().into_iter().map(f32::from).collect();
    let array = Array4::from_shape_vec(INPUT_SHAPE, pixels)
        .map_err(|err| Error::Decode(format!("unexpected pixel buffer: {err}")))?;

    debug!(
        "Preprocessed {}x{} image into {:?}",
        image.width(),
        image.height(),
        array.shape()
    );
    PreprocessedTensor::from_array(array)
}

fn resize_to_input(image: &DynamicImage) -> Result<RgbImage> {
    let source = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut resized = DynamicImage::new_rgb8(INPUT_SIDE, INPUT_SIDE);
    let options = ResizeOptions {
        algorithm: ResizeAlg::Nearest,
        mul_div_alpha: false,
        ..Default::default()
    };
    Resizer::new()
        .resize(&source, &mut resized, &options)
        .map_err(|err| Error::Decode(format!("failed to resample image: {err}")))?;
    Ok(resized.into_rgb8())
}

/// Index of the largest value, the lowest index wins ties.
pub fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .copied()
        .enumerate()
        .reduce(|accum, item| if item.1 > accum.1 { item } else { accum })
        .map(|(index, _)| index)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub index: usize,
    pub class: CancerClass,
    pub label: &'static str,
    pub icon: &'static str,
    /// Probability of the predicted class as a percentage.
    pub confidence: f64,
    pub confidence_text: String,
    pub probabilities: Vec<f32>,
}

impl PredictionResult {
    /// Builds the result from the raw output vector of one model invocation.
    pub fn from_output(output: Vec<f32>) -> Result<Self> {
        if output.len() != CLASS_COUNT {
            return Err(Error::Inference(format!(
                "expected {CLASS_COUNT} class probabilities, the model returned {}",
                output.len()
            )));
        }
        if let Some(value) = output
            .iter()
            .find(|value| !(0.0..=1.0 + PROBABILITY_TOLERANCE).contains(*value))
        {
            return Err(Error::Inference(format!(
                "model output {value} is not a probability"
            )));
        }

        let index = argmax(&output)
            .ok_or_else(|| Error::Inference("the model returned no values".to_string()))?;
        let class = CancerClass::from_index(index)
            .ok_or_else(|| Error::Inference(format!("no label for class index {index}")))?;
        let confidence = f64::from(output[index]) * 100.0;

        Ok(Self {
            index,
            class,
            label: class.name(),
            icon: class.icon(),
            confidence,
            confidence_text: format!("{confidence:.2}%"),
            probabilities: output,
        })
    }
}

/// Runs the model on a preprocessed tensor and picks the most probable class.
pub fn predict(model: &dyn Classifier, tensor: &PreprocessedTensor) -> Result<PredictionResult> {
    let output = model.classify(tensor)?;
    let result = PredictionResult::from_output(output)?;
    info!("Predicted {} ({})", result.label, result.confidence_text);
    Ok(result)
}

/// Shared model handle plus the preprocessing that feeds it.
#[derive(Clone)]
pub struct InferencePipeline {
    classifier: Arc<dyn Classifier>,
}

impl InferencePipeline {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn load(path: &Path, config: &AppConfig) -> Result<Self> {
        let classifier = OnnxClassifier::load_with(path, config)?;
        Ok(Self::new(Arc::new(classifier)))
    }

    pub fn predict_image(&self, bytes: &[u8]) -> Result<PredictionResult> {
        let tensor = preprocess(bytes)?;
        predict(self.classifier.as_ref(), &tensor)
    }

    /// Same as [`Self::predict_image`], on the blocking thread pool.
    pub async fn predict_image_async(&self, bytes: Vec<u8>) -> Result<PredictionResult> {
        let pipeline = self.clone();
        tokio::task::spawn_blocking(move || pipeline.predict_image(&bytes))
            .await
            .map_err(|err| Error::Inference(format!("prediction task failed: {err}")))?
    }
}
