use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use segview_image::Image;
use segview_io::jpeg::encode_image_jpeg_rgb8;

use crate::error::ServeError;

/// Name of the `index`-th stored result.
///
/// # Example
///
/// ```
/// use segview_serve::store::result_file_name;
///
/// assert_eq!(result_file_name(7), "val_batch7_pred.jpg");
/// ```
pub fn result_file_name(index: u64) -> String {
    format!("val_batch{index}_pred.jpg")
}

/// Flat directory of rendered frames.
///
/// Names come from a shared sequence, so concurrent requests never claim
/// the same file.
#[derive(Debug)]
pub struct ResultStore {
    dir: PathBuf,
    next: AtomicU64,
}

impl ResultStore {
    /// Open a store, creating its directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, ServeError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            next: AtomicU64::new(0),
        })
    }

    /// The directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Claim the next file name of the sequence.
    pub fn next_name(&self) -> String {
        result_file_name(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Encode a frame as JPEG and store it under the next name.
    ///
    /// # Returns
    ///
    /// The file name, relative to the store directory.
    pub fn save(&self, frame: &Image<u8, 3>, quality: u8) -> Result<String, ServeError> {
        let bytes = encode_image_jpeg_rgb8(frame, quality).map_err(ServeError::Encode)?;
        self.save_encoded(&bytes)
    }

    /// Store already encoded JPEG bytes under the next name.
    pub fn save_encoded(&self, bytes: &[u8]) -> Result<String, ServeError> {
        let name = self.next_name();
        std::fs::write(self.dir.join(&name), bytes)?;
        log::info!("saved result {}", self.dir.join(&name).display());
        Ok(name)
    }

    /// Path of a stored file, rejecting names that leave the directory.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, ServeError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(ServeError::InvalidFileName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}
