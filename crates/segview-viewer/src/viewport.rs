use segview_image::{Image, ImageError, ImageSize};
use segview_imgproc::{
    interpolation::InterpolationMode,
    warp::{get_rotation_matrix2d, warp_affine_u8},
};

/// Bounds and steps of the zoom, and how the view is resampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportLimits {
    /// Smallest zoom.
    pub min_zoom: f32,
    /// Largest zoom.
    pub max_zoom: f32,
    /// Zoom factor of one scroll step towards the screen.
    pub zoom_in_factor: f32,
    /// Zoom factor of one scroll step away from the screen.
    pub zoom_out_factor: f32,
    /// Color of the screen area not covered by the image.
    pub border: [u8; 3],
    /// Resampling of the warped view.
    pub interpolation: InterpolationMode,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            min_zoom: 0.2,
            max_zoom: 30.0,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            border: [30, 30, 30],
            interpolation: InterpolationMode::Bilinear,
        }
    }
}

/// Zoom and pan state of one viewing session.
///
/// The image is scaled by `zoom` about its center `c` and then translated by
/// `offset`:
///
/// ```text
/// screen = (image - c) * zoom + c + offset
/// image  = (screen - c - offset) / zoom + c
/// ```
///
/// A pan gesture is in progress while a drag anchor is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    image_size: ImageSize,
    limits: ViewportLimits,
    zoom: f32,
    offset: [f32; 2],
    drag_anchor: Option<[f32; 2]>,
}

impl Viewport {
    /// Create an identity viewport for an image.
    pub fn new(image_size: ImageSize) -> Self {
        Self::with_limits(image_size, ViewportLimits::default())
    }

    /// Create an identity viewport with custom limits.
    pub fn with_limits(image_size: ImageSize, limits: ViewportLimits) -> Self {
        Self {
            image_size,
            limits,
            zoom: 1.0,
            offset: [0.0, 0.0],
            drag_anchor: None,
        }
    }

    /// Current zoom, always within the limits.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current translation in screen pixels.
    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }

    /// The anchor of the pan gesture in progress.
    pub fn drag_anchor(&self) -> Option<[f32; 2]> {
        self.drag_anchor
    }

    /// Whether a pan gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// The limits of the viewport.
    pub fn limits(&self) -> &ViewportLimits {
        &self.limits
    }

    /// The size of the viewed image.
    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    /// Center of the zoom, the image center.
    pub fn center(&self) -> [f32; 2] {
        [
            self.image_size.width as f32 / 2.0,
            self.image_size.height as f32 / 2.0,
        ]
    }

    /// Map an image point to the screen.
    pub fn image_to_screen(&self, point: [f32; 2]) -> [f32; 2] {
        let c = self.center();
        [
            (point[0] - c[0]) * self.zoom + c[0] + self.offset[0],
            (point[1] - c[1]) * self.zoom + c[1] + self.offset[1],
        ]
    }

    /// Map a screen point back to the image.
    pub fn screen_to_image(&self, point: [f32; 2]) -> [f32; 2] {
        let c = self.center();
        [
            (point[0] - c[0] - self.offset[0]) / self.zoom + c[0],
            (point[1] - c[1] - self.offset[1]) / self.zoom + c[1],
        ]
    }

    /// Zoom one step at a screen point.
    ///
    /// A positive `direction` zooms in, anything else zooms out. The image
    /// point under `point` stays under it.
    ///
    /// # Returns
    ///
    /// The new zoom.
    pub fn zoom_at(&mut self, point: [f32; 2], direction: f32) -> f32 {
        let factor = if direction > 0.0 {
            self.limits.zoom_in_factor
        } else {
            self.limits.zoom_out_factor
        };

        let anchored = self.screen_to_image(point);
        self.zoom = (self.zoom * factor).clamp(self.limits.min_zoom, self.limits.max_zoom);

        let c = self.center();
        self.offset = [
            point[0] - c[0] - (anchored[0] - c[0]) * self.zoom,
            point[1] - c[1] - (anchored[1] - c[1]) * self.zoom,
        ];

        self.zoom
    }

    /// Start a pan gesture at a screen point.
    pub fn pan_start(&mut self, point: [f32; 2]) {
        self.drag_anchor = Some(point);
    }

    /// Move the pan gesture in progress to a screen point.
    ///
    /// Returns `false`, leaving the viewport untouched, when no gesture is in progress.
    pub fn pan_move(&mut self, point: [f32; 2]) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        self.offset[0] += point[0] - anchor[0];
        self.offset[1] += point[1] - anchor[1];
        self.drag_anchor = Some(point);
        true
    }

    /// End the pan gesture in progress.
    pub fn pan_end(&mut self) {
        self.drag_anchor = None;
    }

    /// Back to zoom 1 without translation.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = [0.0, 0.0];
        self.drag_anchor = None;
    }

    /// The 2x3 matrix mapping image to screen coordinates.
    pub fn affine_matrix(&self) -> [f32; 6] {
        let c = self.center();
        let mut m = get_rotation_matrix2d((c[0], c[1]), 0.0, self.zoom);
        m[2] += self.offset[0];
        m[5] += self.offset[1];
        m
    }

    /// Warp a frame into a screen buffer of `dst_size`.
    ///
    /// Screen pixels not covered by the frame get the border color.
    pub fn render(
        &self,
        frame: &Image<u8, 3>,
        dst_size: ImageSize,
    ) -> Result<Image<u8, 3>, ImageError> {
        let mut view = Image::from_size_val(dst_size, 0)?;
        warp_affine_u8(
            frame,
            &mut view,
            &self.affine_matrix(),
            self.limits.interpolation,
            self.limits.border,
        )?;
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use segview_imgproc::warp::transform_point;

    fn viewport() -> Viewport {
        Viewport::new(ImageSize {
            width: 640,
            height: 480,
        })
    }

    #[test]
    fn identity_mapping() {
        let vp = viewport();
        assert_eq!(vp.image_to_screen([12.0, 34.0]), [12.0, 34.0]);
        assert_eq!(vp.screen_to_image([12.0, 34.0]), [12.0, 34.0]);
        assert!(!vp.is_dragging());
    }

    #[test]
    fn zoom_to_cursor_keeps_point_fixed() {
        let cursors = [[0.0, 0.0], [320.0, 240.0], [17.5, 401.0], [639.0, 3.0]];
        let directions = [1.0, -1.0];

        for start_pan in [[0.0, 0.0], [-55.0, 31.0]] {
            for cursor in cursors {
                for direction in directions {
                    let mut vp = viewport();
                    vp.pan_start([0.0, 0.0]);
                    vp.pan_move(start_pan);
                    vp.pan_end();
                    vp.zoom_at([100.0, 100.0], 1.0);

                    let before = vp.screen_to_image(cursor);
                    vp.zoom_at(cursor, direction);
                    let after = vp.image_to_screen(before);

                    assert_relative_eq!(after[0], cursor[0], epsilon = 1e-2);
                    assert_relative_eq!(after[1], cursor[1], epsilon = 1e-2);
                }
            }
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = viewport();
        for _ in 0..100 {
            vp.zoom_at([10.0, 10.0], 1.0);
        }
        assert_relative_eq!(vp.zoom(), 30.0);

        for _ in 0..100 {
            vp.zoom_at([10.0, 10.0], -1.0);
        }
        assert_relative_eq!(vp.zoom(), 0.2);
    }

    #[test]
    fn zoom_step_factors() {
        let mut vp = viewport();
        assert_relative_eq!(vp.zoom_at([0.0, 0.0], 3.0), 1.2);
        assert_relative_eq!(vp.zoom_at([0.0, 0.0], 0.0), 1.2 * 0.8);
    }

    #[test]
    fn pan_composition() {
        let mut two_steps = viewport();
        two_steps.pan_start([100.0, 100.0]);
        two_steps.pan_move([103.0, 95.0]);
        two_steps.pan_move([110.5, 99.0]);
        two_steps.pan_end();

        let mut one_step = viewport();
        one_step.pan_start([100.0, 100.0]);
        one_step.pan_move([110.5, 99.0]);
        one_step.pan_end();

        assert_eq!(two_steps.offset(), one_step.offset());
        assert_eq!(two_steps.offset(), [10.5, -1.0]);
        assert!(!two_steps.is_dragging());
    }

    #[test]
    fn pan_move_without_anchor_is_ignored() {
        let mut vp = viewport();
        assert!(!vp.pan_move([5.0, 5.0]));
        assert_eq!(vp.offset(), [0.0, 0.0]);
    }

    #[test]
    fn inverse_of_forward() {
        let mut vp = viewport();
        vp.zoom_at([200.0, 120.0], 1.0);
        vp.zoom_at([50.0, 300.0], 1.0);
        vp.pan_start([0.0, 0.0]);
        vp.pan_move([-40.0, 25.0]);

        let p = [123.0, 321.0];
        let back = vp.screen_to_image(vp.image_to_screen(p));
        assert_relative_eq!(back[0], p[0], epsilon = 1e-3);
        assert_relative_eq!(back[1], p[1], epsilon = 1e-3);
    }

    #[test]
    fn matrix_matches_forward_mapping() {
        let mut vp = viewport();
        vp.zoom_at([400.0, 90.0], 1.0);
        vp.pan_start([0.0, 0.0]);
        vp.pan_move([13.0, -7.0]);

        let m = vp.affine_matrix();
        let p = [77.0, 201.0];
        let (u, v) = transform_point(p[0], p[1], &m);
        let expected = vp.image_to_screen(p);
        assert_relative_eq!(u, expected[0], epsilon = 1e-3);
        assert_relative_eq!(v, expected[1], epsilon = 1e-3);
    }

    #[test]
    fn reset_restores_identity() {
        let mut vp = viewport();
        vp.zoom_at([1.0, 2.0], 1.0);
        vp.pan_start([0.0, 0.0]);
        vp.reset();
        assert_eq!(vp, viewport());
    }

    #[test]
    fn render_identity_and_border() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 6,
            height: 4,
        };
        let frame = Image::<u8, 3>::new(size, (0..size.area() * 3).map(|v| v as u8).collect())?;

        let mut vp = Viewport::new(size);
        assert_eq!(vp.render(&frame, size)?, frame);

        // shifted two pixels to the right, the first columns show the border
        vp.pan_start([0.0, 0.0]);
        vp.pan_move([2.0, 0.0]);
        let view = vp.render(&frame, size)?;
        assert_eq!(view.pixel(0, 0), Some(&[30u8, 30, 30][..]));
        assert_eq!(view.pixel(1, 3), Some(&[30u8, 30, 30][..]));
        assert_eq!(view.pixel(2, 0), frame.pixel(0, 0));
        Ok(())
    }
}
