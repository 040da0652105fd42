#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// JPEG image encoding and decoding.
///
/// Pure Rust JPEG codec for reading and writing RGB images, from files or bytes.
pub mod jpeg;

/// Base64 transport encoding of encoded images.
pub mod transport;

pub use crate::error::IoError;
