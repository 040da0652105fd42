use segview_annotate::RenderError;
use segview_io::IoError;

use crate::segmenter::InferenceError;

/// An error type for the render service.
#[derive(thiserror::Error, Debug)]
pub enum ServeError {
    /// The request body is not a valid segment request.
    #[error("Invalid request. {0}")]
    BadRequest(String),

    /// The uploaded image cannot be decoded.
    #[error("Cannot read image. {0}")]
    Decode(#[source] IoError),

    /// The segmentation model failed.
    #[error("Model error. {0}")]
    Inference(#[from] InferenceError),

    /// The detections cannot be rendered.
    #[error("Failed to render the detections. {0}")]
    Render(#[from] RenderError),

    /// A frame cannot be encoded.
    #[error("Failed to encode the frame. {0}")]
    Encode(#[source] IoError),

    /// The result store cannot be written or read.
    #[error("Result store failure. {0}")]
    Store(#[from] std::io::Error),

    /// A result file name escapes the result directory.
    #[error("Invalid result file name: {0}")]
    InvalidFileName(String),

    /// No stored result has this name.
    #[error("Result file not found: {0}")]
    NotFound(String),

    /// The blocking render task did not complete.
    #[error("Render task failed. {0}")]
    Task(String),
}

impl ServeError {
    /// HTTP status code reported for the error.
    ///
    /// Client mistakes map to 4xx, everything else to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ServeError::BadRequest(_) | ServeError::Decode(_) | ServeError::InvalidFileName(_) => {
                400
            }
            ServeError::NotFound(_) => 404,
            ServeError::Inference(_)
            | ServeError::Render(_)
            | ServeError::Encode(_)
            | ServeError::Store(_)
            | ServeError::Task(_) => 500,
        }
    }
}
