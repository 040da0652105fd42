use segview_annotate::{ClassNames, RawDetection};
use segview_image::Image;

/// Failure of the segmentation model.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// A segmentation model producing raw detections for an image.
pub trait Segmenter {
    /// Class names of the model, ordered by class id.
    fn class_names(&self) -> &ClassNames;

    /// Run the model on an RGB image.
    fn segment(&self, image: &Image<u8, 3>) -> Result<Vec<RawDetection>, InferenceError>;
}

/// Segmenter replaying detections computed upstream.
///
/// The HTTP endpoint receives the model output with the image, so the
/// service consumes it through this adapter.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedSegmenter {
    names: ClassNames,
    detections: Vec<RawDetection>,
}

impl PrecomputedSegmenter {
    /// Wrap a set of raw detections.
    pub fn new(names: ClassNames, detections: Vec<RawDetection>) -> Self {
        Self { names, detections }
    }
}

impl Segmenter for PrecomputedSegmenter {
    fn class_names(&self) -> &ClassNames {
        &self.names
    }

    fn segment(&self, _image: &Image<u8, 3>) -> Result<Vec<RawDetection>, InferenceError> {
        Ok(self.detections.clone())
    }
}
