//! Damage annotation types.

use serde::{Deserialize, Serialize};

use super::option::OptionKey;

/// Unique identifier for an annotation.
pub type AnnotationId = u32;

/// Unique identifier for a photo.
pub type PhotoId = u32;

/// Default marker radius, in percent of the displayed image width.
pub const DEFAULT_MARKER_RADIUS: f32 = 2.0;

/// Geometry of a marker, in percent of the displayed image (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarkerShape {
    /// Circular marker centered on the clicked point.
    Circle { x: f32, y: f32, radius: f32 },
}

impl MarkerShape {
    /// Create a circle marker.
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        MarkerShape::Circle { x, y, radius }
    }

    /// Get the center point of the marker.
    pub fn center(&self) -> (f32, f32) {
        match self {
            MarkerShape::Circle { x, y, .. } => (*x, *y),
        }
    }

    /// Check if a point (in percent) falls on the marker.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        match self {
            MarkerShape::Circle { x, y, radius } => {
                let dx = px - x;
                let dy = py - y;
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

/// Review status of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStatus {
    /// Newly placed, awaiting review
    #[default]
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Rejected by a reviewer
    Rejected,
}

/// A classified damage marker on a photo.
///
/// Annotations are created whole when a marker is placed and are never
/// edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Unique identifier.
    pub id: AnnotationId,
    /// Photo this annotation belongs to.
    pub photo_id: PhotoId,
    /// Selected component ids.
    #[serde(default)]
    pub components: Vec<OptionKey>,
    /// Selected material ids.
    #[serde(default)]
    pub material: Vec<OptionKey>,
    /// Selected damage type ids.
    #[serde(default)]
    pub damage_type: Vec<OptionKey>,
    /// Severity value, if a severity was chosen.
    #[serde(default)]
    pub score: Option<OptionKey>,
    /// Whether the damage goes through the paint layer.
    #[serde(default)]
    pub through_paint: bool,
    /// Marker geometry.
    pub shape: MarkerShape,
    /// Marker color as `#RRGGBB`.
    pub color: String,
    /// Review status.
    #[serde(default)]
    pub status: AnnotationStatus,
    /// Name of the annotator.
    #[serde(default)]
    pub created_by: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

impl Annotation {
    /// Create an unclassified annotation with the given shape.
    pub fn new(id: AnnotationId, photo_id: PhotoId, shape: MarkerShape, color: &str) -> Self {
        Self {
            id,
            photo_id,
            components: Vec::new(),
            material: Vec::new(),
            damage_type: Vec::new(),
            score: None,
            through_paint: false,
            shape,
            color: color.to_string(),
            status: AnnotationStatus::default(),
            created_by: String::new(),
            created_at: String::new(),
        }
    }

    /// Check whether any classification was recorded.
    pub fn is_classified(&self) -> bool {
        !self.components.is_empty() || !self.material.is_empty() || !self.damage_type.is_empty()
    }
}
