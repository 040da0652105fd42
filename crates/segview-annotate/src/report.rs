use serde::{Deserialize, Serialize};

use crate::colors::ClassNames;
use crate::detection::Detection;

/// Confidence from which an instance counts as present.
pub const PRESENCE_THRESHOLD: f32 = 0.5;

/// Whether an instance is trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// Confidence at or above [`PRESENCE_THRESHOLD`].
    Present,
    /// Confidence below [`PRESENCE_THRESHOLD`].
    LowConfidence,
}

impl InstanceStatus {
    /// Status for a confidence value.
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= PRESENCE_THRESHOLD {
            Self::Present
        } else {
            Self::LowConfidence
        }
    }
}

/// Short description of one detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceSummary {
    /// Id of the detection.
    pub id: usize,
    /// Class label.
    pub label: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Area of the box in square pixels.
    pub area: i64,
    /// Presence status.
    pub status: InstanceStatus,
}

impl InstanceSummary {
    /// Summarize a detection.
    pub fn from_detection(detection: &Detection) -> Self {
        Self {
            id: detection.id,
            label: detection.label.clone(),
            confidence: detection.confidence,
            area: detection.bbox.area(),
            status: InstanceStatus::from_confidence(detection.confidence),
        }
    }
}

/// Class names found and missing among the detections, in class table order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInventory {
    /// Classes with at least one detection.
    pub found: Vec<String>,
    /// Classes without any detection.
    pub missing: Vec<String>,
}

impl ClassInventory {
    /// Split the class table into found and missing classes.
    ///
    /// A class is found when a detection carries its label, whatever the
    /// confidence.
    pub fn from_detections(names: &ClassNames, detections: &[Detection]) -> Self {
        let (found, missing): (Vec<_>, Vec<_>) = names
            .iter()
            .map(String::from)
            .partition(|name| detections.iter().any(|d| &d.label == name));
        Self { found, missing }
    }
}
