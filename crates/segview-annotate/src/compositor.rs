use segview_image::{Image, ImageSize};
use segview_imgproc::{core::fill_masked, enhance::add_weighted};

use crate::detection::Detection;
use crate::error::RenderError;

/// Weight of the overlay accumulated so far when a new layer is added.
pub const OVERLAY_KEEP: f32 = 1.0;

/// Weight of each new colored mask layer.
pub const LAYER_WEIGHT: f32 = 0.4;

/// Weight of the annotated image in the final merge.
pub const BASE_WEIGHT: f32 = 0.6;

/// Weight of the overlay in the final merge.
pub const OVERLAY_WEIGHT: f32 = 0.4;

/// Two stage mask compositing.
///
/// Colored mask layers are first accumulated into one overlay,
/// `overlay = overlay * 1.0 + layer * 0.4`, in detection order, so later
/// instances dominate the overlapping pixels. The overlay is then merged once
/// with the annotated image, `result = annotated * 0.6 + overlay * 0.4`.
pub struct Compositor {
    overlay: Image<u8, 3>,
    scratch: Image<u8, 3>,
    layer: Image<u8, 3>,
    num_layers: usize,
}

impl Compositor {
    /// Create a compositor with an empty overlay of the given size.
    pub fn new(size: ImageSize) -> Result<Self, RenderError> {
        Ok(Self {
            overlay: Image::from_size_val(size, 0)?,
            scratch: Image::from_size_val(size, 0)?,
            layer: Image::from_size_val(size, 0)?,
            num_layers: 0,
        })
    }

    /// Add the mask of a detection to the overlay, painted with `color`.
    ///
    /// Detections without a mask, or with an empty one, leave the overlay
    /// untouched and return `false`.
    pub fn accumulate(&mut self, detection: &Detection, color: [u8; 3]) -> Result<bool, RenderError> {
        let Some(mask) = detection.mask.as_ref() else {
            return Ok(false);
        };

        if mask.size() != self.overlay.size() {
            return Err(RenderError::MaskSizeMismatch(
                mask.size(),
                self.overlay.size(),
            ));
        }

        if mask.as_slice().iter().all(|&v| v == 0) {
            return Ok(false);
        }

        self.layer.as_slice_mut().fill(0);
        fill_masked(&mut self.layer, mask, color)?;

        add_weighted(
            &self.overlay,
            OVERLAY_KEEP,
            &self.layer,
            LAYER_WEIGHT,
            0.0,
            &mut self.scratch,
        )?;
        std::mem::swap(&mut self.overlay, &mut self.scratch);
        self.num_layers += 1;

        Ok(true)
    }

    /// Number of mask layers accumulated so far.
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// The overlay accumulated so far.
    pub fn overlay(&self) -> &Image<u8, 3> {
        &self.overlay
    }

    /// Merge the overlay into the annotated image.
    ///
    /// Without any accumulated layer the annotated image is returned as is.
    pub fn merge(&self, annotated: Image<u8, 3>) -> Result<Image<u8, 3>, RenderError> {
        if self.num_layers == 0 {
            return Ok(annotated);
        }

        let mut result = Image::from_size_val(annotated.size(), 0)?;
        add_weighted(
            &annotated,
            BASE_WEIGHT,
            &self.overlay,
            OVERLAY_WEIGHT,
            0.0,
            &mut result,
        )?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;

    fn detection_with_mask(mask: Option<Image<u8, 1>>) -> Result<Detection, RenderError> {
        Ok(Detection {
            id: 0,
            class_id: 0,
            label: "Tooth_11".to_string(),
            confidence: 0.9,
            bbox: BoundingBox::new(0, 0, 1, 1)?,
            mask,
            polygon: Vec::new(),
            color: [255, 0, 0],
        })
    }

    #[test]
    fn single_full_mask_literal_values() -> Result<(), RenderError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let mask = Image::<u8, 1>::from_size_val(size, 255)?;
        let detection = detection_with_mask(Some(mask))?;

        let mut compositor = Compositor::new(size)?;
        assert!(compositor.accumulate(&detection, [255, 0, 0])?);

        // 255 * 0.4 = 102
        assert_eq!(compositor.overlay().pixel(1, 1), Some(&[102u8, 0, 0][..]));

        let base = Image::<u8, 3>::from_size_val(size, 200)?;
        let result = compositor.merge(base)?;

        // 200 * 0.6 + 102 * 0.4 = 160.8 and 200 * 0.6 = 120
        assert!(result
            .as_slice()
            .chunks_exact(3)
            .all(|p| p == [161u8, 120, 120]));
        Ok(())
    }

    #[test]
    fn later_layers_add_on_top() -> Result<(), RenderError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let left = Image::<u8, 1>::new(size, vec![255, 0])?;
        let both = Image::<u8, 1>::new(size, vec![255, 255])?;

        let mut compositor = Compositor::new(size)?;
        compositor.accumulate(&detection_with_mask(Some(left))?, [0, 100, 0])?;
        compositor.accumulate(&detection_with_mask(Some(both))?, [0, 0, 200])?;
        assert_eq!(compositor.num_layers(), 2);

        assert_eq!(compositor.overlay().as_slice(), &[0, 40, 80, 0, 0, 80]);
        Ok(())
    }

    #[test]
    fn no_mask_leaves_image_untouched() -> Result<(), RenderError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let mut compositor = Compositor::new(size)?;
        assert!(!compositor.accumulate(&detection_with_mask(None)?, [1, 2, 3])?);

        let empty = Image::<u8, 1>::from_size_val(size, 0)?;
        assert!(!compositor.accumulate(&detection_with_mask(Some(empty))?, [1, 2, 3])?);

        let base = Image::<u8, 3>::from_size_val(size, 77)?;
        assert_eq!(compositor.merge(base.clone())?, base);
        Ok(())
    }

    #[test]
    fn mask_size_must_match() -> Result<(), RenderError> {
        let mask = Image::<u8, 1>::from_size_val([4, 4].into(), 255)?;
        let mut compositor = Compositor::new([2, 2].into())?;
        let res = compositor.accumulate(&detection_with_mask(Some(mask))?, [1, 2, 3]);
        assert!(matches!(res, Err(RenderError::MaskSizeMismatch(..))));
        Ok(())
    }
}
