use segview_image::Image;

use crate::compositor::Compositor;
use crate::detection::Detection;
use crate::error::RenderError;
use crate::painter::{AnnotationPainter, PainterStyle};

/// Color of the highlighted detection, overriding its class color.
pub const HIGHLIGHT_COLOR: [u8; 3] = [255, 255, 0];

/// What to draw on a rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Draw the box outlines.
    pub show_boxes: bool,
    /// Draw the labels.
    pub show_labels: bool,
    /// Blend the instance masks.
    pub show_masks: bool,
    /// Index of the detection drawn with [`RenderOptions::highlight_color`].
    pub highlight: Option<usize>,
    /// Color of the highlighted detection.
    pub highlight_color: [u8; 3],
    /// Style of the boxes and labels.
    pub style: PainterStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_boxes: true,
            show_labels: true,
            show_masks: true,
            highlight: None,
            highlight_color: HIGHLIGHT_COLOR,
            style: PainterStyle::default(),
        }
    }
}

/// Render the detections on top of a base image.
///
/// Masks are accumulated into one overlay in detection order while boxes and
/// labels are painted on a copy of the base image; the overlay is merged last.
/// Each detection is drawn in its own color unless it is the highlighted one.
///
/// # Arguments
///
/// * `base` - The original image.
/// * `detections` - The detections, painted in list order.
/// * `options` - The toggles, highlight and style.
///
/// # Returns
///
/// The composited frame, same size as `base`.
pub fn render(
    base: &Image<u8, 3>,
    detections: &[Detection],
    options: &RenderOptions,
) -> Result<Image<u8, 3>, RenderError> {
    let painter = AnnotationPainter::new(options.style);
    let mut compositor = Compositor::new(base.size())?;
    let mut annotated = base.clone();

    for (index, detection) in detections.iter().enumerate() {
        let color = if options.highlight == Some(index) {
            options.highlight_color
        } else {
            detection.color
        };

        if options.show_masks {
            match compositor.accumulate(detection, color) {
                Ok(_) => {}
                Err(RenderError::MaskSizeMismatch(mask, image)) => {
                    log::warn!(
                        "skipping mask of detection {}: {mask} does not match {image}",
                        detection.id
                    );
                }
                Err(err) => return Err(err),
            }
        }

        painter.paint(
            &mut annotated,
            detection,
            color,
            options.show_boxes,
            options.show_labels,
        );
    }

    log::debug!(
        "rendered {} detections, {} mask layers",
        detections.len(),
        compositor.num_layers()
    );

    compositor.merge(annotated)
}
