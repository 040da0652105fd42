use segview_image::{Image, ImageError};

use crate::parallel;

/// Write a constant color at every pixel where the mask is non zero.
///
/// Pixels where the mask is zero are left untouched.
///
/// # Arguments
///
/// * `dst` - The image to paint into.
/// * `mask` - The binary mask selecting the pixels to paint.
/// * `color` - The color to write.
///
/// # Example
///
/// ```
/// use segview_image::{Image, ImageSize};
/// use segview_imgproc::core::fill_masked;
///
/// let mut layer = Image::<u8, 3>::from_size_val([2, 1].into(), 0).unwrap();
/// let mask = Image::<u8, 1>::new([2, 1].into(), vec![255, 0]).unwrap();
///
/// fill_masked(&mut layer, &mask, [10, 20, 30]).unwrap();
///
/// assert_eq!(layer.as_slice(), &[10, 20, 30, 0, 0, 0]);
/// ```
pub fn fill_masked<const C: usize>(
    dst: &mut Image<u8, C>,
    mask: &Image<u8, 1>,
    color: [u8; C],
) -> Result<(), ImageError> {
    if dst.size() != mask.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            mask.width(),
            mask.height(),
        ));
    }

    parallel::par_iter_rows(mask, dst, |mask_pixel, dst_pixel| {
        if mask_pixel[0] != 0 {
            dst_pixel.copy_from_slice(&color);
        }
    });

    Ok(())
}

/// Count the non zero pixels of a single channel image.
pub fn count_non_zero(src: &Image<u8, 1>) -> usize {
    src.as_slice().iter().filter(|&&v| v != 0).count()
}
