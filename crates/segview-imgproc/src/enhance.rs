use segview_image::{Image, ImageError};

use crate::parallel;

/// Performs weighted addition of two images `src1` and `src2` with weights `alpha`
/// and `beta`, and a scalar `gamma`. The formula used is:
///
/// dst(x,y,c) = saturate(src1(x,y,c) * alpha + src2(x,y,c) * beta + gamma)
///
/// where `saturate` rounds to the nearest integer and clamps to [0, 255].
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image elements to be multiplied.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image elements to be multiplied.
/// * `gamma` - Scalar added to each sum.
/// * `dst` - The output image.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match.
///
/// # Example
///
/// ```
/// use segview_image::Image;
/// use segview_imgproc::enhance::add_weighted;
///
/// let a = Image::<u8, 1>::new([2, 1].into(), vec![200, 10]).unwrap();
/// let b = Image::<u8, 1>::new([2, 1].into(), vec![100, 255]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val([2, 1].into(), 0).unwrap();
///
/// add_weighted(&a, 0.6, &b, 0.4, 0.0, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), &[160, 108]);
/// ```
pub fn add_weighted<const C: usize>(
    src1: &Image<u8, C>,
    alpha: f32,
    src2: &Image<u8, C>,
    beta: f32,
    gamma: f32,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows_two(src1, src2, dst, |src1_pixel, src2_pixel, dst_pixel| {
        for ((&a, &b), out) in src1_pixel.iter().zip(src2_pixel).zip(dst_pixel.iter_mut()) {
            *out = saturate_u8(a as f32 * alpha + b as f32 * beta + gamma);
        }
    });

    Ok(())
}

/// Round to the nearest integer and clamp into the u8 range.
#[inline]
pub fn saturate_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
