use segview_image::{ImageError, ImageSize};

/// Errors raised while resolving a raw mask to the image resolution.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MaskError {
    /// The raw mask cannot be mapped onto the target image.
    #[error("Raw mask of {width}x{height} with {values} values cannot be resolved to {target}")]
    ResolutionMismatch {
        /// Width of the raw mask.
        width: usize,
        /// Height of the raw mask.
        height: usize,
        /// Number of values carried by the raw mask.
        values: usize,
        /// Size of the image the mask was resolved against.
        target: ImageSize,
    },

    /// Error from the underlying image containers.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// An error type for the rendering pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The box is empty or inverted.
    #[error("Invalid bounding box [{0}, {1}, {2}, {3}]")]
    InvalidBox(i32, i32, i32, i32),

    /// The box coordinates are not finite numbers.
    #[error("Bounding box has non finite coordinates")]
    NonFiniteBox,

    /// The per detection mask does not match the image being rendered.
    #[error("Mask of {0} does not match the image of {1}")]
    MaskSizeMismatch(ImageSize, ImageSize),

    /// Error resolving a mask.
    #[error(transparent)]
    Mask(#[from] MaskError),

    /// Error from the underlying image containers.
    #[error(transparent)]
    Image(#[from] ImageError),
}
