use segview_image::{Image, ImageError};

use crate::interpolation::{interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Inverts a 2x3 affine transformation matrix.
///
/// A singular matrix yields the zero transform.
///
/// # Arguments
///
/// * `m` - The 2x3 affine transformation matrix in row-major order.
///
/// # Returns
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 matrix rotating and scaling around a center point.
///
/// The matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use segview_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((50.0, 50.0), 0.0, 2.0);
/// assert_eq!(m, [2.0, 0.0, -50.0, 0.0, 2.0, -50.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle.to_radians();
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an 8-bit image.
///
/// Every destination pixel is mapped back into the source with the inverse of
/// `m` and sampled there; destination pixels whose source location falls
/// outside of the source image are set to `border`.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation mapping source to destination coordinates.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - The constant color used outside of the source image.
///
/// # Example
///
/// ```
/// use segview_image::{Image, ImageSize};
/// use segview_imgproc::interpolation::InterpolationMode;
/// use segview_imgproc::warp::warp_affine_u8;
///
/// let src = Image::<u8, 3>::from_size_val([4, 5].into(), 1).unwrap();
/// let mut dst = Image::<u8, 3>::from_size_val([4, 5].into(), 0).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// warp_affine_u8(&src, &mut dst, &m, InterpolationMode::Nearest, [0, 0, 0]).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine_u8<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
    border: [u8; C],
) -> Result<(), ImageError> {
    if src.size().is_empty() && !dst.size().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // invert the transform to find the source location of every destination pixel
    let m_inv = invert_affine_transform(m);

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let (u, v) = transform_point(x as f32, y as f32, &m_inv);
        let pixel = interpolate_pixel(src, u, v, border, interpolation);
        dst_pixel.copy_from_slice(&pixel);
    });

    Ok(())
}
