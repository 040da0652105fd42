use serde::{Deserialize, Serialize};

use segview_annotate::{report::ClassInventory, Detection, RawDetection};

/// Body of `POST /api/segment`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentRequest {
    /// Base64 encoded JPEG bytes, optionally as a data url.
    pub image: String,
    /// Output of the segmentation model for the image.
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

/// One detection as reported to the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Position of the detection in the list.
    pub id: usize,
    /// Class label.
    pub label: String,
    /// Confidence rounded to three decimals.
    pub confidence: f32,
    /// Box as `[x1, y1, x2, y2]`.
    pub bbox: [i32; 4],
    /// Outer contour of the mask, empty without a mask.
    pub polygon: Vec<[i32; 2]>,
    /// Display color as RGB.
    pub color: [u8; 3],
}

impl DetectionRecord {
    /// Wire form of a detection.
    pub fn from_detection(detection: &Detection) -> Self {
        Self {
            id: detection.id,
            label: detection.label.clone(),
            confidence: round_confidence(detection.confidence),
            bbox: detection.bbox.to_array(),
            polygon: detection.polygon.clone(),
            color: detection.color,
        }
    }
}

fn round_confidence(confidence: f32) -> f32 {
    (confidence * 1000.0).round() / 1000.0
}

/// Body of a successful render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentResponse {
    /// Base64 JPEG of the input image.
    pub original: String,
    /// Base64 JPEG of the annotated frame.
    pub segmented: String,
    /// The detections drawn on the frame.
    pub detections: Vec<DetectionRecord>,
    /// Name of the stored frame.
    pub result_file: String,
    /// Url the stored frame is served from.
    pub result_url: String,
    /// Width of the image.
    pub width: usize,
    /// Height of the image.
    pub height: usize,
    /// Classes found and missing.
    pub inventory: ClassInventory,
}

/// Body of every failed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn confidence_is_rounded() {
        assert_relative_eq!(round_confidence(0.87654), 0.877);
        assert_relative_eq!(round_confidence(0.1234), 0.123);
    }

    #[test]
    fn request_without_detections() -> Result<(), serde_json::Error> {
        let request: SegmentRequest = serde_json::from_str(r#"{"image": "aGVsbG8="}"#)?;
        assert!(request.detections.is_empty());

        let request: SegmentRequest = serde_json::from_str(
            r#"{"image": "", "detections": [{"class_id": 2, "confidence": 0.5, "bbox": [1, 2, 3, 4]}]}"#,
        )?;
        assert_eq!(request.detections.len(), 1);
        assert!(request.detections[0].mask.is_none());
        Ok(())
    }
}
