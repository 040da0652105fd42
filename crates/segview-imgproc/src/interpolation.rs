use segview_image::Image;

use crate::enhance::saturate_u8;

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for bilinear interpolation of all the channels of a pixel.
///
/// The neighbors past the last row or column are clamped to the image border.
/// The caller must ensure that `(u, v)` lies inside the image.
fn bilinear_interpolation<const C: usize>(image: &Image<u8, C>, u: f32, v: f32) -> [u8; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let frac_u = u.fract();
    let frac_v = v.fract();

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let mut pixel = [0u8; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        let value = data[base00 + k] as f32 * w00
            + data[base01 + k] as f32 * w01
            + data[base10 + k] as f32 * w10
            + data[base11 + k] as f32 * w11;
        *out = saturate_u8(value);
    }

    pixel
}

/// Kernel for nearest neighbor interpolation of all the channels of a pixel.
fn nearest_neighbor_interpolation<const C: usize>(
    image: &Image<u8, C>,
    u: f32,
    v: f32,
) -> [u8; C] {
    let iu = (u.round().max(0.0) as usize).min(image.cols() - 1);
    let iv = (v.round().max(0.0) as usize).min(image.rows() - 1);

    let start = (iv * image.cols() + iu) * C;
    let mut pixel = [0u8; C];
    pixel.copy_from_slice(&image.as_slice()[start..start + C]);
    pixel
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - The value returned when `(u, v)` falls outside of the image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel, one value per channel.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<u8, C>,
    u: f32,
    v: f32,
    border: [u8; C],
    interpolation: InterpolationMode,
) -> [u8; C] {
    let inside = u >= 0.0 && v >= 0.0 && u < image.cols() as f32 && v < image.rows() as f32;
    if !inside || image.size().is_empty() {
        return border;
    }

    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}
