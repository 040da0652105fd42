use serde::{Deserialize, Serialize};

use segview_image::{Image, ImageSize};
use segview_imgproc::{
    contours::{find_first_external_contour, Contour},
    resize::resize_nearest,
    threshold::threshold_binary,
};

use crate::error::MaskError;

/// Probability above which a mask pixel belongs to the instance.
pub const MASK_THRESHOLD: f32 = 0.5;

/// Value of the instance pixels in a binary mask.
pub const MASK_ON: u8 = 255;

/// Per instance probability mask at the model's internal resolution.
///
/// The values are stored row-major, `width * height` of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMask {
    /// Width of the mask in pixels.
    pub width: usize,
    /// Height of the mask in pixels.
    pub height: usize,
    /// Probabilities in row-major order.
    pub data: Vec<f32>,
}

/// A mask resolved to the image resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMask {
    /// Binary mask, [`MASK_ON`] for instance pixels and zero elsewhere.
    pub mask: Image<u8, 1>,
    /// Outer silhouette of the mask, empty when the mask is empty.
    pub polygon: Contour,
}

/// Resolve a raw probability mask to a binary mask at the target resolution.
///
/// The raw mask is resampled with nearest neighbor to keep a crisp edge, then
/// thresholded at [`MASK_THRESHOLD`]. Only the first outer border found by a
/// raster scan is kept as polygon: holes and further fragments are dropped, so
/// the polygon describes a silhouette and not the mask topology.
///
/// # Arguments
///
/// * `raw` - The probability mask at the model resolution.
/// * `target` - The size of the original image.
///
/// # Errors
///
/// [`MaskError::ResolutionMismatch`] when the raw mask is empty, its declared
/// size overflows, its data does not match its declared size, or the target is
/// empty.
///
/// # Example
///
/// ```
/// use segview_annotate::{mask::resolve_mask, RawMask};
///
/// let raw = RawMask { width: 2, height: 2, data: vec![0.9, 0.0, 0.0, 0.0] };
/// let resolved = resolve_mask(&raw, [4, 4].into()).unwrap();
///
/// assert_eq!(resolved.polygon, vec![[0, 0], [0, 1], [1, 1], [1, 0]]);
/// ```
pub fn resolve_mask(raw: &RawMask, target: ImageSize) -> Result<ResolvedMask, MaskError> {
    let mismatch = || MaskError::ResolutionMismatch {
        width: raw.width,
        height: raw.height,
        values: raw.data.len(),
        target,
    };

    let raw_size = ImageSize {
        width: raw.width,
        height: raw.height,
    };
    if raw_size.is_empty() || target.is_empty() || raw_size.checked_area() != Some(raw.data.len()) {
        return Err(mismatch());
    }

    let probabilities = Image::<f32, 1>::new(raw_size, raw.data.clone())?;

    let mut resized = Image::<f32, 1>::from_size_val(target, 0.0)?;
    resize_nearest(&probabilities, &mut resized)?;

    let mut mask = Image::<u8, 1>::from_size_val(target, 0)?;
    threshold_binary(&resized, &mut mask, MASK_THRESHOLD, MASK_ON)?;

    let polygon = find_first_external_contour(&mask).unwrap_or_default();

    Ok(ResolvedMask { mask, polygon })
}
