use segview_annotate::Detection;

use crate::viewport::Viewport;

/// Tolerances of the pointer hit tests, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectorConfig {
    /// Largest distance between a click and a box center that still selects it.
    pub screen_tolerance: f32,
    /// Largest pointer travel between press and release that still counts as a click.
    pub click_slop: f32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            screen_tolerance: 80.0,
            click_slop: 4.0,
        }
    }
}

/// Maps pointer positions to detections.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    config: SelectorConfig,
}

impl Selector {
    /// Create a selector with the given tolerances.
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// The tolerances of the selector.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Pick the detection whose box center is closest to a click.
    ///
    /// The click is mapped to the image first. The closest center wins, the
    /// first one in list order on ties, and only if it is nearer than the
    /// screen tolerance divided by the zoom.
    ///
    /// # Arguments
    ///
    /// * `viewport` - The current viewport.
    /// * `detections` - The detections of the frame.
    /// * `point` - The click position in screen pixels.
    ///
    /// # Returns
    ///
    /// The index of the selected detection, `None` when the click misses.
    pub fn select(
        &self,
        viewport: &Viewport,
        detections: &[Detection],
        point: [f32; 2],
    ) -> Option<usize> {
        let [x, y] = viewport.screen_to_image(point);

        let mut best: Option<(usize, f32)> = None;
        for (index, detection) in detections.iter().enumerate() {
            let (cx, cy) = detection.bbox.center();
            let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        let tolerance = self.config.screen_tolerance / viewport.zoom();
        best.filter(|&(_, d)| d < tolerance).map(|(index, _)| index)
    }

    /// Find the first detection whose outline contains a pointer position.
    ///
    /// Detections with fewer than three outline points are skipped.
    pub fn hover(
        &self,
        viewport: &Viewport,
        detections: &[Detection],
        point: [f32; 2],
    ) -> Option<usize> {
        let [x, y] = viewport.screen_to_image(point);
        detections
            .iter()
            .position(|d| d.polygon.len() >= 3 && point_in_polygon(&d.polygon, x, y))
    }
}

/// Even-odd test of a point against a closed polygon.
///
/// # Example
///
/// ```
/// use segview_viewer::selector::point_in_polygon;
///
/// let square = [[0, 0], [0, 10], [10, 10], [10, 0]];
/// assert!(point_in_polygon(&square, 5.0, 5.0));
/// assert!(!point_in_polygon(&square, 15.0, 5.0));
/// ```
pub fn point_in_polygon(polygon: &[[i32; 2]], x: f32, y: f32) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (xi, yi) = (polygon[i][0] as f32, polygon[i][1] as f32);
        let (xj, yj) = (polygon[j][0] as f32, polygon[j][1] as f32);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use segview_annotate::{BoundingBox, RenderError};
    use segview_image::ImageSize;

    fn detection(bbox: [i32; 4], polygon: Vec<[i32; 2]>) -> Result<Detection, RenderError> {
        let [x1, y1, x2, y2] = bbox;
        Ok(Detection {
            id: 0,
            class_id: 0,
            label: "Tooth_11".to_string(),
            confidence: 0.9,
            bbox: BoundingBox::new(x1, y1, x2, y2)?,
            mask: None,
            polygon,
            color: [1, 2, 3],
        })
    }

    fn viewport() -> Viewport {
        Viewport::new(ImageSize {
            width: 400,
            height: 300,
        })
    }

    #[test]
    fn click_on_center_selects() -> Result<(), RenderError> {
        let detections = vec![
            detection([0, 0, 20, 20], vec![])?,
            detection([100, 100, 140, 160], vec![])?,
        ];
        let selector = Selector::default();
        assert_eq!(selector.select(&viewport(), &detections, [120.0, 130.0]), Some(1));
        assert_eq!(selector.select(&viewport(), &detections, [10.0, 10.0]), Some(0));
        Ok(())
    }

    #[test]
    fn tolerance_shrinks_with_zoom() -> Result<(), RenderError> {
        let detections = vec![detection([180, 130, 220, 170], vec![])?];
        let selector = Selector::default();

        // box center on the zoom center, so it stays put on screen
        for steps in [0, 3, 7] {
            let mut vp = viewport();
            for _ in 0..steps {
                vp.zoom_at([200.0, 150.0], 1.0);
            }
            let zoom = vp.zoom();
            let eps = 0.5;

            // 80 / zoom - eps / zoom and 80 / zoom + eps away in image pixels
            let inside = [200.0 + 80.0 - eps, 150.0];
            let outside = [200.0 + (80.0 / zoom + eps) * zoom, 150.0];

            assert_eq!(selector.select(&vp, &detections, inside), Some(0));
            assert_eq!(selector.select(&vp, &detections, outside), None);
        }
        Ok(())
    }

    #[test]
    fn ties_go_to_the_first() -> Result<(), RenderError> {
        let detections = vec![
            detection([0, 0, 20, 20], vec![])?,
            detection([0, 0, 20, 20], vec![])?,
        ];
        let selector = Selector::default();
        assert_eq!(selector.select(&viewport(), &detections, [11.0, 9.0]), Some(0));
        Ok(())
    }

    #[test]
    fn empty_list_selects_nothing() {
        let selector = Selector::default();
        assert_eq!(selector.select(&viewport(), &[], [1.0, 1.0]), None);
        assert_eq!(selector.hover(&viewport(), &[], [1.0, 1.0]), None);
    }

    #[test]
    fn hover_uses_outlines() -> Result<(), RenderError> {
        let triangle = vec![[0, 0], [0, 40], [40, 40]];
        let square = vec![[10, 10], [10, 30], [30, 30], [30, 10]];
        let detections = vec![
            detection([0, 0, 5, 5], vec![[1, 1], [2, 2]])?,
            detection([0, 0, 40, 40], triangle)?,
            detection([10, 10, 30, 30], square)?,
        ];
        let selector = Selector::default();
        let vp = viewport();

        // in both the triangle and the square: first wins
        assert_eq!(selector.hover(&vp, &detections, [15.0, 25.0]), Some(1));
        // only in the square
        assert_eq!(selector.hover(&vp, &detections, [25.0, 12.0]), Some(2));
        // in none, the degenerate outline is skipped
        assert_eq!(selector.hover(&vp, &detections, [3.0, 1.0]), None);
        Ok(())
    }
}
