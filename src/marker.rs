//! Marker placement and selection on the displayed photo.
//!
//! Positions are percentages of the displayed image so markers stay put
//! when the image is rescaled.

use crate::error::MarkerError;
use crate::model::{AnnotationId, DEFAULT_MARKER_RADIUS, MarkerShape};

/// Upper bound of percent coordinates.
pub const MAX_PERCENT: f32 = 100.0;

/// Default marker color for unclassified damage.
pub const DEFAULT_MARKER_COLOR: &str = "#ff3b30";

/// A validated pointer position in percent of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    x: f32,
    y: f32,
}

impl MarkerPosition {
    /// Validate a percent position. Both axes must be finite and within 0-100.
    pub fn new(x: f32, y: f32) -> Result<Self, MarkerError> {
        let in_range = |v: f32| v.is_finite() && (0.0..=MAX_PERCENT).contains(&v);
        if in_range(x) && in_range(y) {
            Ok(Self { x, y })
        } else {
            Err(MarkerError::OutOfBounds { x, y })
        }
    }

    /// Convert a pixel position on a displayed image of the given size.
    pub fn from_pixels(px: f32, py: f32, width: f32, height: f32) -> Result<Self, MarkerError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(MarkerError::OutOfBounds { x: px, y: py });
        }
        Self::new(px / width * MAX_PERCENT, py / height * MAX_PERCENT)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

/// Shape and color applied to newly placed markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Circle radius in percent
    pub radius: f32,
    /// Fallback color when no severity is chosen
    pub color: String,
}

impl MarkerStyle {
    /// Build the circle shape for a marker at `position`.
    pub fn shape_at(&self, position: MarkerPosition) -> MarkerShape {
        MarkerShape::circle(position.x, position.y, self.radius)
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: DEFAULT_MARKER_RADIUS,
            color: DEFAULT_MARKER_COLOR.to_string(),
        }
    }
}

/// Exclusive marker selection: at most one marker is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSelection {
    selected: Option<AnnotationId>,
}

impl MarkerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on marker `id` and return the new selection.
    ///
    /// Clicking the selected marker deselects it; clicking another marker
    /// moves the selection there.
    pub fn click(&mut self, id: AnnotationId) -> Option<AnnotationId> {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        self.selected
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn is_selected(&self, id: AnnotationId) -> bool {
        self.selected == Some(id)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
