use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The classifier artifact could not be loaded. Fatal at startup.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The upload is not a decodable JPEG or PNG image.
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl Error {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::ModelLoad(_))
    }

    /// Text rendered inline on the prediction view.
    pub fn user_message(&self) -> String {
        match self {
            Error::ModelLoad(_) => {
                "The model could not be loaded, predictions are unavailable.".to_string()
            }
            Error::Decode(_) => {
                "This file is not a valid image. Please upload a JPEG or PNG image.".to_string()
            }
            Error::Inference(_) => "The analysis failed. Please try again.".to_string(),
        }
    }
}

impl From<ort::Error> for Error {
    fn from(err: ort::Error) -> Self {
        Error::Inference(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_model_load_is_fatal() {
        assert!(!Error::ModelLoad("missing".into()).is_recoverable());
        assert!(Error::Decode("bad bytes".into()).is_recoverable());
        assert!(Error::Inference("shape".into()).is_recoverable());
    }

    #[test]
    fn user_message_hides_details() {
        let err = Error::Inference("output has 4 values".into());
        assert!(!err.user_message().contains("4 values"));
        assert!(Error::Decode("x".into()).user_message().contains("JPEG or PNG"));
    }
}
