//! Error types for catalog, selection and marker operations.

use thiserror::Error;

use crate::model::{AnnotationId, CatalogKind, OptionKey};

/// Errors raised while building a catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two options share the same id
    #[error("Duplicate option id '{id}' in {kind} catalog")]
    DuplicateId {
        /// Catalog the duplicate was found in
        kind: CatalogKind,
        /// The repeated id
        id: OptionKey,
    },

    /// Option label is empty or whitespace
    #[error("Option '{id}' in {kind} catalog has an empty label")]
    EmptyLabel {
        /// Catalog the option belongs to
        kind: CatalogKind,
        /// Id of the offending option
        id: OptionKey,
    },
}

/// Errors raised by selection state and selector panels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// The id is not part of the catalog backing the selection
    #[error("Unknown {kind} option '{id}'")]
    UnknownOption {
        /// Catalog that was searched
        kind: CatalogKind,
        /// The id that was not found
        id: OptionKey,
    },

    /// A choice was made while the panel was closed
    #[error("{kind} panel is not open")]
    PanelClosed {
        /// Category of the closed panel
        kind: CatalogKind,
    },

    /// The category has no selector panel
    #[error("{kind} has no selector panel")]
    NotSelectable {
        /// The requested category
        kind: CatalogKind,
    },
}

/// Errors raised while placing or selecting markers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkerError {
    /// Coordinate outside the 0-100 percent range or not finite
    #[error("Marker position ({x}, {y}) is outside the image")]
    OutOfBounds {
        /// Horizontal position in percent
        x: f32,
        /// Vertical position in percent
        y: f32,
    },

    /// No photo is active
    #[error("No active photo")]
    NoActivePhoto,

    /// The marker does not exist on the active photo
    #[error("Marker {0} not found on the active photo")]
    UnknownMarker(AnnotationId),

    /// Every annotation id up to `u32::MAX` is taken
    #[error("No annotation ids left")]
    IdSpaceExhausted,
}

/// Errors raised while loading photos from a provider.
#[derive(Error, Debug)]
pub enum JobError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two photos share the same id
    #[error("Duplicate photo id {0}")]
    DuplicatePhoto(u32),

    /// The provider returned no photos
    #[error("Job '{0}' has no photos")]
    Empty(String),
}

/// Errors raised while setting up a workspace from its providers.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The photo provider failed
    #[error("Failed to load job: {0}")]
    Job(#[from] JobError),

    /// The catalog provider returned an invalid catalog
    #[error("Failed to load catalogs: {0}")]
    Catalog(#[from] CatalogError),
}
