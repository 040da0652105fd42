/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the JPEG image.
    #[error("Error with Jpeg decoding. {0}")]
    JpegDecodingError(#[from] zune_jpeg::errors::DecodeErrors),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// The decoded JPEG has a pixel layout that cannot be turned into RGB.
    #[error("Unsupported Jpeg pixel layout: {0} bytes for a {1}x{2} image")]
    UnsupportedPixelLayout(usize, usize, usize),

    /// The image is too large for the JPEG format.
    #[error("Image of {0}x{1} pixels exceeds the Jpeg size limit")]
    ImageTooLarge(usize, usize),

    /// Error to decode a base64 payload.
    #[error("Failed to decode the base64 payload. {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] segview_image::ImageError),
}
