use std::path::{Path, PathBuf};

use segview_annotate::{
    painter::PainterStyle, render, report::InstanceSummary, Detection, RenderOptions,
};
use segview_image::{Image, ImageSize};
use segview_io::jpeg::write_image_jpeg_rgb8;

use crate::error::SessionError;
use crate::event::{Command, Control, ViewerEvent};
use crate::selector::{Selector, SelectorConfig};
use crate::viewport::{Viewport, ViewportLimits};

/// Default file written by the export command.
pub const DEFAULT_EXPORT_PATH: &str = "result_view.jpg";

/// JPEG quality of the exported frames.
pub const EXPORT_QUALITY: u8 = 95;

/// Which overlays are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleState {
    /// Draw the boxes.
    pub show_boxes: bool,
    /// Draw the labels.
    pub show_labels: bool,
    /// Blend the masks.
    pub show_masks: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            show_boxes: true,
            show_labels: true,
            show_masks: true,
        }
    }
}

/// State of one interactive viewing session.
///
/// Events are consumed one at a time by [`Session::handle`], between frames,
/// so a frame never sees a half applied update.
pub struct Session {
    base: Image<u8, 3>,
    detections: Vec<Detection>,
    toggles: ToggleState,
    selected: Option<usize>,
    hovered: Option<usize>,
    viewport: Viewport,
    selector: Selector,
    style: PainterStyle,
    export_path: PathBuf,
    press: Option<[f32; 2]>,
    travel: f32,
}

impl Session {
    /// Create a session over an image and its detections.
    ///
    /// # Arguments
    ///
    /// * `base` - The original image.
    /// * `detections` - The detections, each carrying its display color.
    /// * `export_path` - The file written by the export command.
    pub fn new(
        base: Image<u8, 3>,
        detections: Vec<Detection>,
        export_path: impl AsRef<Path>,
    ) -> Self {
        let viewport = Viewport::new(base.size());
        Self {
            base,
            detections,
            toggles: ToggleState::default(),
            selected: None,
            hovered: None,
            viewport,
            selector: Selector::default(),
            style: PainterStyle::default(),
            export_path: export_path.as_ref().to_path_buf(),
            press: None,
            travel: 0.0,
        }
    }

    /// Replace the zoom limits, resetting the view.
    pub fn with_limits(mut self, limits: ViewportLimits) -> Self {
        self.viewport = Viewport::with_limits(self.base.size(), limits);
        self
    }

    /// Replace the hit test tolerances.
    pub fn with_selector(mut self, config: SelectorConfig) -> Self {
        self.selector = Selector::new(config);
        self
    }

    /// Replace the box and label style.
    pub fn with_style(mut self, style: PainterStyle) -> Self {
        self.style = style;
        self
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: ViewerEvent) -> Control {
        match event {
            ViewerEvent::Scroll { position, delta } => {
                let zoom = self.viewport.zoom_at(position, delta);
                log::debug!("zoom {zoom:.2} at {position:?}");
            }
            ViewerEvent::PointerDown(position) => {
                self.viewport.pan_start(position);
                self.press = Some(position);
                self.travel = 0.0;
            }
            ViewerEvent::PointerMove(position) => {
                if self.viewport.pan_move(position) {
                    self.track_travel(position);
                }
                self.hovered = self
                    .selector
                    .hover(&self.viewport, &self.detections, position);
            }
            ViewerEvent::PointerUp(position) => {
                self.track_travel(position);
                self.viewport.pan_end();

                // a release without a press is not a click
                let clicked = self.press.take().is_some()
                    && self.travel <= self.selector.config().click_slop;
                self.travel = 0.0;

                if clicked {
                    self.selected = self
                        .selector
                        .select(&self.viewport, &self.detections, position);
                    log::debug!("selection {:?}", self.selected);
                }
            }
            ViewerEvent::Key(command) => return self.apply(command),
        }
        Control::Continue
    }

    fn track_travel(&mut self, position: [f32; 2]) {
        if let Some(press) = self.press {
            let distance = ((position[0] - press[0]).powi(2) + (position[1] - press[1]).powi(2)).sqrt();
            self.travel = self.travel.max(distance);
        }
    }

    fn apply(&mut self, command: Command) -> Control {
        match command {
            Command::ToggleBoxes => self.toggles.show_boxes = !self.toggles.show_boxes,
            Command::ToggleLabels => self.toggles.show_labels = !self.toggles.show_labels,
            Command::ToggleMasks => self.toggles.show_masks = !self.toggles.show_masks,
            Command::ResetView => self.viewport.reset(),
            Command::Export => {
                if let Err(err) = self.export() {
                    log::error!("export to {} failed: {err}", self.export_path.display());
                }
            }
            Command::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Select the first detection carrying a class label.
    ///
    /// An unknown label clears the selection.
    ///
    /// # Returns
    ///
    /// The index of the selected detection.
    pub fn select_label(&mut self, label: &str) -> Option<usize> {
        self.selected = self.detections.iter().position(|d| d.label == label);
        log::debug!("selection {:?} for label {label}", self.selected);
        self.selected
    }

    /// Options of the next frame, from the toggles and the selection.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_boxes: self.toggles.show_boxes,
            show_labels: self.toggles.show_labels,
            show_masks: self.toggles.show_masks,
            highlight: self.selected,
            style: self.style,
            ..Default::default()
        }
    }

    /// The full composited frame, at image resolution.
    pub fn frame(&self) -> Result<Image<u8, 3>, SessionError> {
        Ok(render(&self.base, &self.detections, &self.render_options())?)
    }

    /// The frame as seen through the viewport, in a screen buffer of `dst_size`.
    pub fn view(&self, dst_size: ImageSize) -> Result<Image<u8, 3>, SessionError> {
        let frame = self.frame()?;
        Ok(self.viewport.render(&frame, dst_size)?)
    }

    /// Write the full composited frame to the export path.
    pub fn export(&self) -> Result<PathBuf, SessionError> {
        let frame = self.frame()?;
        write_image_jpeg_rgb8(&self.export_path, &frame, EXPORT_QUALITY)?;
        log::info!("exported frame to {}", self.export_path.display());
        Ok(self.export_path.clone())
    }

    /// The overlay toggles.
    pub fn toggles(&self) -> ToggleState {
        self.toggles
    }

    /// Index of the selected detection.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Index of the detection under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Summary of the selected detection.
    pub fn selected_summary(&self) -> Option<InstanceSummary> {
        self.selected
            .and_then(|index| self.detections.get(index))
            .map(InstanceSummary::from_detection)
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The detections of the session.
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// The original image.
    pub fn base(&self) -> &Image<u8, 3> {
        &self.base
    }

    /// The file written by the export command.
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }
}
