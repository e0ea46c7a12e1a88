//! Damage Annotator - vehicle damage annotation core
//!
//! Photos of a vehicle are annotated by placing markers and classifying
//! each marker by component, material, damage type and severity. This crate
//! holds the state behind that screen: option catalogs with search,
//! selector panels with confirm/cancel semantics, marker placement and
//! selection, and the job/photo data model. Rendering is left to the
//! embedding application.

pub mod color_utils;
pub mod config;
pub mod error;
pub mod marker;
pub mod model;
pub mod panel;
pub mod provider;
pub mod sample;
pub mod selection;
pub mod timestamp;
pub mod workspace;

pub use config::{AnnotatorConfig, ConfigError, LogLevel};
pub use error::{CatalogError, JobError, LoadError, MarkerError, SelectionError};
pub use panel::{ClassificationPanel, PanelRow, PanelState, SelectorPanel};
pub use selection::{CategorySelection, SelectionMode, SelectionSet};
pub use workspace::{AnnotationSummary, AnnotationWorkspace, WorkspaceEvent};
