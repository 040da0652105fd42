#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types of the render service.
pub mod error;

/// HTTP routes over the render service.
pub mod routes;

/// The segmentation model seam.
pub mod segmenter;

/// Stateless render path from encoded images to annotated frames.
pub mod service;

/// Flat directory of the rendered frames.
pub mod store;

/// JSON bodies of the HTTP api.
pub mod wire;

pub use crate::error::ServeError;
pub use crate::routes::router;
pub use crate::segmenter::{InferenceError, PrecomputedSegmenter, Segmenter};
pub use crate::service::SegmentService;
pub use crate::store::ResultStore;
pub use crate::wire::{DetectionRecord, ErrorResponse, SegmentRequest, SegmentResponse};
