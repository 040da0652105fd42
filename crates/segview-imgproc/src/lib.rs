#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color conversions module.
pub mod color;

/// image basic operations module.
pub mod core;

/// border following on binary images.
pub mod contours;

/// utilities to draw on images.
pub mod draw;

/// image blending module.
pub mod enhance;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;

/// operations to threshold images.
pub mod threshold;

/// image geometric transformations module.
pub mod warp;
