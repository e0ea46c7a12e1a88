//! Data models for the damage annotator.

mod annotation;
mod catalog;
mod option;
mod photo;

pub use annotation::{
    Annotation, AnnotationId, AnnotationStatus, DEFAULT_MARKER_RADIUS, MarkerShape, PhotoId,
};
pub use catalog::{
    Catalog, CatalogKind, Catalogs, UNKNOWN_LABEL, default_component_options,
    default_damage_type_options, default_material_options, default_severity_options,
    filter_options,
};
pub use option::{CatalogOption, OptionKey};
pub use photo::{Job, Photo, PhotoCursor};
