/// An error type for the viewer session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// Error composing the frame.
    #[error("Failed to render the frame. {0}")]
    Render(#[from] segview_annotate::RenderError),

    /// Error warping or allocating an image.
    #[error(transparent)]
    Image(#[from] segview_image::ImageError),

    /// Error writing the exported frame.
    #[error("Failed to export the frame. {0}")]
    Export(#[from] segview_io::IoError),
}
