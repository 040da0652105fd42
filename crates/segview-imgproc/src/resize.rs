use segview_image::{Image, ImageError};

use crate::parallel;

/// Resize an image with nearest neighbor sampling.
///
/// The destination pixel `(x, y)` takes the value of the source pixel
/// `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))`, so binary masks keep
/// a crisp edge and no new values are introduced.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, already sized to the target size.
///
/// # Errors
///
/// Returns an error if the source image is empty while the destination is not.
///
/// # Example
///
/// ```
/// use segview_image::Image;
/// use segview_imgproc::resize::resize_nearest;
///
/// let src = Image::<u8, 1>::new([2, 1].into(), vec![1, 2]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val([4, 2].into(), 0).unwrap();
///
/// resize_nearest(&src, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 1, 2, 2, 1, 1, 2, 2]);
/// ```
pub fn resize_nearest<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if dst.size().is_empty() {
        return Ok(());
    }

    if src.size().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let (src_w, src_h) = (src.width(), src.height());
    let (dst_w, dst_h) = (dst.width(), dst.height());
    let src_data = src.as_slice();

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let sx = (x * src_w / dst_w).min(src_w - 1);
        let sy = (y * src_h / dst_h).min(src_h - 1);
        let base = (sy * src_w + sx) * C;
        dst_pixel.copy_from_slice(&src_data[base..base + C]);
    });

    Ok(())
}
