use segview_image::Image;
use segview_imgproc::draw::{draw_filled_rect, draw_rect, draw_text, text_size};

use crate::detection::{BoundingBox, Detection};

/// Visual parameters of the boxes and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PainterStyle {
    /// Thickness of the box outline in pixels.
    pub box_thickness: usize,
    /// Integer scale of the 8x8 label font.
    pub text_scale: usize,
    /// Vertical distance between the box top edge and the label baseline.
    pub label_gap: i64,
    /// Horizontal padding between the background left edge and the text.
    pub padding_x: i64,
    /// Total vertical padding of the label background.
    pub padding_y: i64,
    /// Color of the label background.
    pub background: [u8; 3],
    /// Color of the label text.
    pub foreground: [u8; 3],
}

impl Default for PainterStyle {
    fn default() -> Self {
        Self {
            box_thickness: 2,
            text_scale: 1,
            label_gap: 10,
            padding_x: 2,
            padding_y: 4,
            background: [0, 0, 0],
            foreground: [255, 255, 255],
        }
    }
}

/// Label shown next to a box, e.g. `Tooth_11 0.87`.
pub fn label_text(label: &str, confidence: f32) -> String {
    format!("{label} {confidence:.2}")
}

/// Pixel rectangles of a label: background `[x0, y0, x1, y1)` and text top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelLayout {
    /// Top-left corner of the background, inclusive.
    pub background_min: (i64, i64),
    /// Bottom-right corner of the background, exclusive.
    pub background_max: (i64, i64),
    /// Top-left corner of the first glyph.
    pub text_origin: (i64, i64),
}

/// Draws boxes and labels onto the working image.
#[derive(Clone, Debug, Default)]
pub struct AnnotationPainter {
    style: PainterStyle,
}

impl AnnotationPainter {
    /// Create a painter with the given style.
    pub fn new(style: PainterStyle) -> Self {
        Self { style }
    }

    /// The style of the painter.
    pub fn style(&self) -> &PainterStyle {
        &self.style
    }

    /// Place the label of a box.
    ///
    /// The bottom of the label sits `label_gap` pixels above the box when there
    /// is room for it, otherwise `label_gap` pixels below the box top edge, so
    /// the label never leaves the canvas at the top.
    pub fn label_layout(&self, bbox: &BoundingBox, text: &str) -> LabelLayout {
        let (tw, th) = text_size(text, self.style.text_scale);
        let (tw, th) = (tw as i64, th as i64);
        let (x1, y1) = (bbox.x1 as i64, bbox.y1 as i64);
        let gap = self.style.label_gap;

        let label_y = if y1 - th - gap > 0 {
            y1 - gap
        } else {
            y1 + th + gap
        };

        let pad_x = self.style.padding_x;
        let pad_y = self.style.padding_y;
        LabelLayout {
            background_min: (x1, label_y - th - pad_y),
            background_max: (x1 + tw + 2 * pad_x, label_y),
            text_origin: (x1 + pad_x, label_y - pad_y / 2 - th),
        }
    }

    /// Draw the box outline of a detection.
    pub fn draw_box(&self, image: &mut Image<u8, 3>, bbox: &BoundingBox, color: [u8; 3]) {
        draw_rect(
            image,
            (bbox.x1 as i64, bbox.y1 as i64),
            (bbox.x2 as i64, bbox.y2 as i64),
            color,
            self.style.box_thickness,
        );
    }

    /// Draw a white on black label for a box.
    pub fn draw_label(&self, image: &mut Image<u8, 3>, bbox: &BoundingBox, text: &str) {
        let layout = self.label_layout(bbox, text);
        draw_filled_rect(
            image,
            layout.background_min,
            layout.background_max,
            self.style.background,
        );
        draw_text(
            image,
            text,
            layout.text_origin,
            self.style.foreground,
            self.style.text_scale,
        );
    }

    /// Paint the box and label of one detection.
    ///
    /// # Arguments
    ///
    /// * `image` - The working image, mutated in place.
    /// * `detection` - The detection to paint.
    /// * `color` - The box color, usually the class color of the detection.
    /// * `show_boxes` - Whether to draw the box outline.
    /// * `show_labels` - Whether to draw the label.
    pub fn paint(
        &self,
        image: &mut Image<u8, 3>,
        detection: &Detection,
        color: [u8; 3],
        show_boxes: bool,
        show_labels: bool,
    ) {
        if show_boxes {
            self.draw_box(image, &detection.bbox, color);
        }
        if show_labels {
            let text = label_text(&detection.label, detection.confidence);
            self.draw_label(image, &detection.bbox, &text);
        }
    }
}
