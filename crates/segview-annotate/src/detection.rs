use serde::{Deserialize, Serialize};

use segview_image::{Image, ImageSize};
use segview_imgproc::contours::Contour;

use crate::colors::{ClassNames, ColorTable};
use crate::error::RenderError;
use crate::mask::{resolve_mask, RawMask};

/// One instance as reported by the segmentation model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Index into the class name table.
    pub class_id: usize,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Box corners `[x1, y1, x2, y2]` in image pixels.
    pub bbox: [f32; 4],
    /// Probability mask at the model resolution, when the model produces masks.
    #[serde(default)]
    pub mask: Option<RawMask>,
}

/// Axis aligned box in image pixels, with `x1 < x2` and `y1 < y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
}

impl BoundingBox {
    /// Create a box, rejecting empty or inverted ones.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self, RenderError> {
        if x1 >= x2 || y1 >= y2 {
            return Err(RenderError::InvalidBox(x1, y1, x2, y2));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Create a box from floating point corners, truncating them to integers.
    ///
    /// # Example
    ///
    /// ```
    /// use segview_annotate::BoundingBox;
    ///
    /// let bbox = BoundingBox::from_xyxy([10.7, 10.2, 50.9, 50.0]).unwrap();
    /// assert_eq!(bbox.to_array(), [10, 10, 50, 50]);
    /// ```
    pub fn from_xyxy(xyxy: [f32; 4]) -> Result<Self, RenderError> {
        if xyxy.iter().any(|v| !v.is_finite()) {
            return Err(RenderError::NonFiniteBox);
        }
        let [x1, y1, x2, y2] = xyxy.map(|v| v as i32);
        Self::new(x1, y1, x2, y2)
    }

    /// Corners as `[x1, y1, x2, y2]`.
    pub fn to_array(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Width of the box in pixels.
    pub fn width(&self) -> i64 {
        self.x2 as i64 - self.x1 as i64
    }

    /// Height of the box in pixels.
    pub fn height(&self) -> i64 {
        self.y2 as i64 - self.y1 as i64
    }

    /// Area of the box in square pixels, saturating at `i64::MAX`.
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Center of the box.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.x1 as f32 + self.x2 as f32) / 2.0,
            (self.y1 as f32 + self.y2 as f32) / 2.0,
        )
    }

    /// Whether a point lies inside the box, borders included.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x1 as f32 && x <= self.x2 as f32 && y >= self.y1 as f32 && y <= self.y2 as f32
    }
}

/// One instance ready to be rendered.
///
/// Built once per inference from a [`RawDetection`] and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Position of the detection in its list.
    pub id: usize,
    /// Index into the class name table.
    pub class_id: usize,
    /// Human readable class name.
    pub label: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Box in image pixels.
    pub bbox: BoundingBox,
    /// Binary mask at image resolution.
    pub mask: Option<Image<u8, 1>>,
    /// Outer silhouette of the mask, empty without mask.
    pub polygon: Contour,
    /// Display color of the class.
    pub color: [u8; 3],
}

impl Detection {
    /// Build a detection from the raw model output.
    ///
    /// A mask that cannot be resolved against `image_size` is dropped with a
    /// warning; the detection keeps its box and label.
    ///
    /// # Errors
    ///
    /// Returns an error when the box is empty, inverted or not finite.
    pub fn build(
        id: usize,
        raw: &RawDetection,
        image_size: ImageSize,
        names: &ClassNames,
        colors: &ColorTable,
    ) -> Result<Self, RenderError> {
        let bbox = BoundingBox::from_xyxy(raw.bbox)?;

        let (mask, polygon) = match raw.mask.as_ref().map(|m| resolve_mask(m, image_size)) {
            Some(Ok(resolved)) => (Some(resolved.mask), resolved.polygon),
            Some(Err(err)) => {
                log::warn!("detection {id}: dropping mask, {err}");
                (None, Vec::new())
            }
            None => (None, Vec::new()),
        };

        Ok(Self {
            id,
            class_id: raw.class_id,
            label: names.label(raw.class_id),
            confidence: raw.confidence,
            bbox,
            mask,
            polygon,
            color: colors.color_for(raw.class_id),
        })
    }

    /// Whether the detection carries a mask.
    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }
}

/// Build the detection list of one inference.
///
/// Detections with an invalid box are skipped with a warning; the ids are the
/// positions in the returned list.
///
/// # Arguments
///
/// * `raws` - The raw model output, in model order.
/// * `image_size` - The size of the original image.
/// * `names` - The class name table.
/// * `colors` - The class color table.
pub fn build_detections(
    raws: &[RawDetection],
    image_size: ImageSize,
    names: &ClassNames,
    colors: &ColorTable,
) -> Vec<Detection> {
    let mut detections = Vec::with_capacity(raws.len());
    for (index, raw) in raws.iter().enumerate() {
        match Detection::build(detections.len(), raw, image_size, names, colors) {
            Ok(detection) => detections.push(detection),
            Err(err) => log::warn!("skipping raw detection {index}: {err}"),
        }
    }

    log::debug!(
        "built {} detections out of {} for an image of {image_size}",
        detections.len(),
        raws.len()
    );

    detections
}
