use num_traits::Zero;

use segview_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to an image.
///
/// Values strictly greater than `threshold` become `max_value`, everything
/// else becomes zero. The destination may use a different pixel type than
/// the source, e.g. probabilities in `f32` thresholded into a `u8` mask.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image.
/// * `threshold` - The threshold value, in the source pixel type.
/// * `max_value` - The value written where the source exceeds the threshold.
///
/// # Examples
///
/// ```
/// use segview_image::{Image, ImageSize};
/// use segview_imgproc::threshold::threshold_binary;
///
/// let data = vec![0.2f32, 0.5, 0.51, 0.9];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 2 }, data).unwrap();
///
/// let mut mask = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut mask, 0.5, 255).unwrap();
/// assert_eq!(mask.as_slice(), &[0, 0, 255, 255]);
/// ```
pub fn threshold_binary<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    threshold: T,
    max_value: U,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd,
    U: Copy + Send + Sync + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (s, d) in src_pixel.iter().zip(dst_pixel.iter_mut()) {
            *d = if *s > threshold { max_value } else { U::zero() };
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use segview_image::{Image, ImageError, ImageSize};

    #[test]
    fn threshold_binary_u8() -> Result<(), ImageError> {
        let data = vec![100u8, 200, 50, 150, 200, 250];
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            data,
        )?;

        let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::threshold_binary(&image, &mut thresholded, 100, 255)?;

        assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
        Ok(())
    }

    #[test]
    fn threshold_binary_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val([2, 2].into(), 1.0)?;
        let mut mask = Image::<u8, 1>::from_size_val([1, 2].into(), 0)?;
        assert!(super::threshold_binary(&image, &mut mask, 0.5, 255).is_err());
        Ok(())
    }
}
