//! Photos of an inspection job and their annotations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, AnnotationId, PhotoId};
use crate::error::JobError;

/// A vehicle photo and the annotations placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Unique identifier.
    pub id: PhotoId,
    /// Job the photo was taken for.
    pub job_id: String,
    /// Camera view name, e.g. "Front Left".
    pub view_name: String,
    /// Image location.
    pub url: String,
    /// Position of the photo within the job.
    pub sequence: u32,
    /// Annotations owned by this photo.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Photo {
    /// Create a photo without annotations.
    pub fn new(id: PhotoId, job_id: &str, view_name: &str, url: &str, sequence: u32) -> Self {
        Self {
            id,
            job_id: job_id.to_string(),
            view_name: view_name.to_string(),
            url: url.to_string(),
            sequence,
            annotations: Vec::new(),
        }
    }

    /// Get an annotation by ID.
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Find the topmost annotation whose marker covers the point (in percent).
    pub fn hit_test(&self, x: f32, y: f32) -> Option<AnnotationId> {
        self.annotations
            .iter()
            .rev()
            .find(|a| a.shape.contains_point(x, y))
            .map(|a| a.id)
    }

    /// Largest annotation id on this photo.
    pub fn max_annotation_id(&self) -> Option<AnnotationId> {
        self.annotations.iter().map(|a| a.id).max()
    }
}

/// An inspection job: the ordered photos of one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Job identifier.
    pub id: String,
    /// Photos, ordered by sequence.
    pub photos: Vec<Photo>,
}

impl Job {
    /// Build a job, sorting photos by sequence and rejecting duplicate ids.
    pub fn new(id: &str, mut photos: Vec<Photo>) -> Result<Self, JobError> {
        let mut seen = HashSet::new();
        for photo in &photos {
            if !seen.insert(photo.id) {
                return Err(JobError::DuplicatePhoto(photo.id));
            }
        }
        photos.sort_by_key(|p| p.sequence);
        Ok(Self {
            id: id.to_string(),
            photos,
        })
    }

    /// Parse a job from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, JobError> {
        let raw: Job = serde_json::from_str(json)?;
        Self::new(&raw.id, raw.photos)
    }

    /// Serialize the job to pretty JSON.
    pub fn to_json(&self) -> Result<String, JobError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn photo_mut(&mut self, id: PhotoId) -> Option<&mut Photo> {
        self.photos.iter_mut().find(|p| p.id == id)
    }

    /// Remove a photo together with its annotations.
    pub fn remove_photo(&mut self, id: PhotoId) -> Option<Photo> {
        let index = self.photos.iter().position(|p| p.id == id)?;
        let photo = self.photos.remove(index);
        log::debug!(
            "Removed photo {} with {} annotations",
            photo.id,
            photo.annotations.len()
        );
        Some(photo)
    }

    /// Largest annotation id across all photos.
    pub fn max_annotation_id(&self) -> Option<AnnotationId> {
        self.photos
            .iter()
            .filter_map(Photo::max_annotation_id)
            .max()
    }

    /// Get total annotation count across all photos.
    pub fn total_annotations(&self) -> usize {
        self.photos.iter().map(|p| p.annotations.len()).sum()
    }
}

/// Cursor over the photos of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotoCursor {
    index: usize,
}

impl PhotoCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next photo, wrapping around.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Move to the previous photo, wrapping around.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = if self.index == 0 {
                len - 1
            } else {
                self.index - 1
            };
        }
    }

    /// Jump to a position, ignoring out-of-range requests.
    pub fn jump(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Keep the cursor inside `0..len` after the photo list shrank.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    /// Get progress string like "3/15".
    pub fn progress(&self, len: usize) -> String {
        if len == 0 {
            return "0/0".to_string();
        }
        format!("{}/{}", self.index + 1, len)
    }
}
