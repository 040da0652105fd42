#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Deterministic class colors and class names.
pub mod colors;

/// Overlay accumulation and final merge of the instance masks.
pub mod compositor;

/// Detection records built from the raw model output.
pub mod detection;

/// Error types for the annotation pipeline.
pub mod error;

/// Model resolution masks to image resolution masks and outlines.
pub mod mask;

/// Boxes and labels drawn on top of the image.
pub mod painter;

/// The stateless render entry point.
pub mod render;

/// Per instance summaries and class inventory.
pub mod report;

pub use crate::colors::{ClassNames, ColorTable};
pub use crate::detection::{build_detections, BoundingBox, Detection, RawDetection};
pub use crate::mask::{RawMask, ResolvedMask};
pub use crate::error::{MaskError, RenderError};
pub use crate::render::{render, RenderOptions};
