use font8x8::{UnicodeFonts, BASIC_FONTS};
use segview_image::Image;

/// Width and height in pixels of one glyph of the bitmap font at scale 1.
pub const GLYPH_SIZE: usize = 8;

/// Helper function to set a pixel's color, ignoring pixels outside of the image.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Draws a line on an image inplace using a standard Bresenham's line algorithm.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line, approximated with a square brush.
pub fn draw_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    // walk only the part of the line that can touch the image
    let half_thickness = thickness as i64 / 2;
    let bounds = (
        -half_thickness,
        -half_thickness,
        img.cols() as i64 - 1 + half_thickness,
        img.rows() as i64 - 1 + half_thickness,
    );
    let Some(((mut x0, mut y0), (x1, y1))) = clip_segment(p0, p1, bounds) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        if thickness <= 1 {
            set_pixel(img, x0, y0, color);
        } else {
            for i in -half_thickness..=half_thickness {
                for j in -half_thickness..=half_thickness {
                    set_pixel(img, x0 + i, y0 + j, color);
                }
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Clip a segment to the inclusive box `(x_min, y_min, x_max, y_max)`.
///
/// Liang-Barsky clipping; a segment fully inside the box is returned as is.
fn clip_segment(
    p0: (i64, i64),
    p1: (i64, i64),
    (x_min, y_min, x_max, y_max): (i64, i64, i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    if x_min > x_max || y_min > y_max {
        return None;
    }

    let inside = |(x, y): (i64, i64)| x >= x_min && x <= x_max && y >= y_min && y <= y_max;
    if inside(p0) && inside(p1) {
        return Some((p0, p1));
    }

    let (x0, y0) = (p0.0 as f64, p0.1 as f64);
    let dx = p1.0 as f64 - x0;
    let dy = p1.1 as f64 - y0;

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let edges = [
        (-dx, x0 - x_min as f64),
        (dx, x_max as f64 - x0),
        (-dy, y0 - y_min as f64),
        (dy, y_max as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    let point = |t: f64| {
        (
            ((x0 + t * dx).round() as i64).clamp(x_min, x_max),
            ((y0 + t * dy).round() as i64).clamp(y_min, y_max),
        )
    };
    Some((point(t0), point(t1)))
}

/// Draws a rectangle outline on an image inplace.
///
/// The outline is made of `thickness` concentric one pixel outlines. The first
/// one lies exactly on the given corners; the others alternate outwards and
/// inwards, so a thickness of 2 adds one pixel outside of the rectangle.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `top_left` - The top-left corner coordinates (x, y).
/// * `bottom_right` - The bottom-right corner coordinates (x, y), inclusive.
/// * `color` - The color of the rectangle outline.
/// * `thickness` - The thickness of the lines.
pub fn draw_rect<const C: usize>(
    img: &mut Image<u8, C>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    let (lx0, lx1) = (top_left.0.min(bottom_right.0), top_left.0.max(bottom_right.0));
    let (ly0, ly1) = (top_left.1.min(bottom_right.1), top_left.1.max(bottom_right.1));

    let first = -((thickness.max(1) as i64 - 1) / 2);
    for k in 0..thickness.max(1) as i64 {
        // grow order: 0, +1, ... for even thickness; -1, 0, +1 ... for odd
        let g = if thickness % 2 == 0 { k } else { first + k };
        let (x0, y0, x1, y1) = (lx0 - g, ly0 - g, lx1 + g, ly1 + g);
        if x0 > x1 || y0 > y1 {
            continue;
        }
        draw_line(img, (x0, y0), (x1, y0), color, 1);
        draw_line(img, (x0, y1), (x1, y1), color, 1);
        draw_line(img, (x0, y0), (x0, y1), color, 1);
        draw_line(img, (x1, y0), (x1, y1), color, 1);
    }
}

/// Draws a filled rectangle on an image inplace.
///
/// The rectangle covers the half open range `[top_left, bottom_right)` and is
/// clipped to the image bounds.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `top_left` - The top-left corner coordinates (x, y), inclusive.
/// * `bottom_right` - The bottom-right corner coordinates (x, y), exclusive.
/// * `color` - The fill color of the rectangle.
pub fn draw_filled_rect<const C: usize>(
    img: &mut Image<u8, C>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [u8; C],
) {
    let x_min = top_left.0.min(bottom_right.0).max(0);
    let y_min = top_left.1.min(bottom_right.1).max(0);
    let x_max = top_left.0.max(bottom_right.0).min(img.cols() as i64);
    let y_max = top_left.1.max(bottom_right.1).min(img.rows() as i64);

    for y in y_min..y_max {
        for x in x_min..x_max {
            set_pixel(img, x, y, color);
        }
    }
}

/// Size in pixels (width, height) of a text rendered with [`draw_text`].
///
/// # Example
///
/// ```
/// use segview_imgproc::draw::text_size;
///
/// assert_eq!(text_size("abc", 1), (24, 8));
/// assert_eq!(text_size("abc", 2), (48, 16));
/// ```
pub fn text_size(text: &str, scale: usize) -> (usize, usize) {
    let scale = scale.max(1);
    (
        text.chars().count() * GLYPH_SIZE * scale,
        GLYPH_SIZE * scale,
    )
}

/// Draws a text on an image inplace with an 8x8 bitmap font.
///
/// Characters missing from the font are drawn as `?`. Pixels falling outside of
/// the image are skipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `text` - The text to draw.
/// * `top_left` - The top-left corner of the first glyph (x, y).
/// * `color` - The color of the glyph pixels.
/// * `scale` - Integer magnification of each glyph pixel.
pub fn draw_text<const C: usize>(
    img: &mut Image<u8, C>,
    text: &str,
    top_left: (i64, i64),
    color: [u8; C],
    scale: usize,
) {
    let scale = scale.max(1) as i64;
    let (mut cursor_x, y) = top_left;

    for ch in text.chars() {
        if let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) {
            for (row_idx, row_bits) in glyph.iter().enumerate() {
                for col_idx in 0..GLYPH_SIZE {
                    if (row_bits >> col_idx) & 1 == 0 {
                        continue;
                    }
                    let px = cursor_x + col_idx as i64 * scale;
                    let py = y + row_idx as i64 * scale;
                    for sy in 0..scale {
                        for sx in 0..scale {
                            set_pixel(img, px + sx, py + sy, color);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_SIZE as i64 * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segview_image::{Image, ImageError, ImageSize};

    #[rustfmt::skip]
    #[test]
    fn test_draw_line() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_line(&mut img, (0, 0), (4, 4), [255], 1);
        assert_eq!(
            img.as_slice(),
            &[
                255,   0,   0,   0,   0,
                  0, 255,   0,   0,   0,
                  0,   0, 255,   0,   0,
                  0,   0,   0, 255,   0,
                  0,   0,   0,   0, 255,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_rect() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_rect(&mut img, (1, 1), (3, 3), [128], 1);
        assert_eq!(
            img.as_slice(),
            &[
                  0,   0,   0,   0,   0,
                  0, 128, 128, 128,   0,
                  0, 128,   0, 128,   0,
                  0, 128, 128, 128,   0,
                  0,   0,   0,   0,   0,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_rect_far_outside() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        // only the clipped part of the outline is walked
        let start = std::time::Instant::now();
        draw_rect(&mut img, (1, 1), (i32::MAX as i64, 3), [7], 2);
        draw_rect(&mut img, (-(1 << 40), -(1 << 40)), (1 << 40, 1 << 40), [7], 2);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(
            img.as_slice(),
            &[
                7, 7, 7, 7, 7,
                7, 7, 7, 7, 7,
                7, 7, 0, 0, 0,
                7, 7, 7, 7, 7,
                7, 7, 7, 7, 7,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_line_clipped() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_line(&mut img, (-10, 2), (1 << 40, 2), [1], 1);
        draw_line(&mut img, (-3, -3), (7, 7), [2], 1);
        draw_line(&mut img, (10, 0), (20, 4), [3], 1);
        assert_eq!(
            img.as_slice(),
            &[
                2, 0, 0, 0, 0,
                0, 2, 0, 0, 0,
                1, 1, 2, 1, 1,
                0, 0, 0, 2, 0,
                0, 0, 0, 0, 2,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_rect_thickness_two() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 6, height: 6 }, vec![0u8; 36],
        )?;
        draw_rect(&mut img, (2, 2), (3, 3), [9], 2);
        assert_eq!(
            img.as_slice(),
            &[
                0, 0, 0, 0, 0, 0,
                0, 9, 9, 9, 9, 0,
                0, 9, 9, 9, 9, 0,
                0, 9, 9, 9, 9, 0,
                0, 9, 9, 9, 9, 0,
                0, 0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_rect_rgb() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 5,
                height: 5,
            },
            0u8,
        )?;
        draw_rect(&mut img, (1, 1), (3, 3), [0, 255, 0], 1);
        assert_eq!(img.get_pixel(1, 1, 1)?, &255);
        assert_eq!(img.get_pixel(3, 1, 1)?, &255);
        assert_eq!(img.get_pixel(1, 3, 1)?, &255);
        assert_eq!(img.get_pixel(3, 3, 1)?, &255);
        assert_eq!(img.get_pixel(2, 2, 1)?, &0);
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_filled_rect() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_filled_rect(&mut img, (1, 1), (4, 3), [200]);
        assert_eq!(
            img.as_slice(),
            &[
                  0,   0,   0,   0,   0,
                  0, 200, 200, 200,   0,
                  0, 200, 200, 200,   0,
                  0,   0,   0,   0,   0,
                  0,   0,   0,   0,   0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_filled_rect_clipped() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val([3, 3].into(), 0)?;
        draw_filled_rect(&mut img, (-5, -5), (1, 10), [1]);
        assert_eq!(img.as_slice(), &[1, 0, 0, 1, 0, 0, 1, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_draw_text() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val([20, 10].into(), 0)?;
        draw_text(&mut img, "A", (1, 1), [255, 255, 255], 1);

        let lit = img
            .as_slice()
            .chunks_exact(3)
            .filter(|p| *p == [255u8, 255, 255])
            .count();
        assert!(lit > 0);

        // nothing is drawn outside of the glyph cell
        for y in 0..10 {
            for x in 9..20 {
                assert_eq!(img.get_pixel(x, y, 0)?, &0);
            }
        }
        Ok(())
    }

    #[test]
    fn test_draw_text_space_is_blank() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val([16, 8].into(), 0)?;
        draw_text(&mut img, "  ", (0, 0), [255], 1);
        assert!(img.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }
}
