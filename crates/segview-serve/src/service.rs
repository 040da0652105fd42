use segview_annotate::{
    build_detections, render, report::ClassInventory, ClassNames, ColorTable, RawDetection,
    RenderOptions,
};
use segview_image::Image;
use segview_io::{
    jpeg::{decode_image_jpeg_rgb8, encode_image_jpeg_rgb8},
    transport::encode_base64,
};

use crate::error::ServeError;
use crate::segmenter::Segmenter;
use crate::store::ResultStore;
use crate::wire::{DetectionRecord, SegmentResponse};

/// Default JPEG quality of the returned and stored frames.
pub const DEFAULT_QUALITY: u8 = 90;

/// Stateless render path: image and detections in, annotated frame out.
///
/// The class tables are fixed at construction. The only shared state is
/// the name sequence of the [`ResultStore`], so one service can handle
/// concurrent requests.
#[derive(Debug)]
pub struct SegmentService {
    names: ClassNames,
    colors: ColorTable,
    store: ResultStore,
    quality: u8,
}

impl SegmentService {
    /// Create a service.
    ///
    /// # Arguments
    ///
    /// * `names` - The class name table.
    /// * `seed` - The seed of the class color shuffle.
    /// * `store` - Where the rendered frames are written.
    /// * `quality` - JPEG quality of the encoded frames.
    pub fn new(names: ClassNames, seed: u64, store: ResultStore, quality: u8) -> Self {
        let colors = ColorTable::from_class_names(&names, seed);
        Self {
            names,
            colors,
            store,
            quality,
        }
    }

    /// Create a service using the class names of a model.
    pub fn for_segmenter(
        segmenter: &impl Segmenter,
        seed: u64,
        store: ResultStore,
        quality: u8,
    ) -> Self {
        Self::new(segmenter.class_names().clone(), seed, store, quality)
    }

    /// The class name table.
    pub fn names(&self) -> &ClassNames {
        &self.names
    }

    /// The class color table.
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// The result store.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Render detections computed upstream on an encoded image.
    pub fn render(
        &self,
        image_bytes: &[u8],
        raws: &[RawDetection],
    ) -> Result<SegmentResponse, ServeError> {
        let image = decode_image_jpeg_rgb8(image_bytes).map_err(ServeError::Decode)?;
        self.render_image(&image, raws)
    }

    /// Run a model on an encoded image and render its detections.
    ///
    /// Nothing is rendered or stored when the model fails.
    pub fn segment(
        &self,
        image_bytes: &[u8],
        segmenter: &impl Segmenter,
    ) -> Result<SegmentResponse, ServeError> {
        let image = decode_image_jpeg_rgb8(image_bytes).map_err(ServeError::Decode)?;
        let raws = segmenter.segment(&image)?;
        self.render_image(&image, &raws)
    }

    fn render_image(
        &self,
        image: &Image<u8, 3>,
        raws: &[RawDetection],
    ) -> Result<SegmentResponse, ServeError> {
        log::debug!("rendering {} raw detections on {}", raws.len(), image.size());

        let detections = build_detections(raws, image.size(), &self.names, &self.colors);
        let frame = render(image, &detections, &RenderOptions::default())?;

        let original = encode_image_jpeg_rgb8(image, self.quality).map_err(ServeError::Encode)?;
        let segmented = encode_image_jpeg_rgb8(&frame, self.quality).map_err(ServeError::Encode)?;
        let result_file = self.store.save_encoded(&segmented)?;

        Ok(SegmentResponse {
            original: encode_base64(&original),
            segmented: encode_base64(&segmented),
            detections: detections.iter().map(DetectionRecord::from_detection).collect(),
            result_url: format!("/results/{result_file}"),
            result_file,
            width: image.width(),
            height: image.height(),
            inventory: ClassInventory::from_detections(&self.names, &detections),
        })
    }
}
