//! Boundary traits for the data an annotation session consumes.
//!
//! The embedding application decides where catalogs and photos come from
//! (a config file, an API, bundled samples); the session only sees these traits.

use crate::config::AnnotatorConfig;
use crate::error::{CatalogError, JobError};
use crate::model::{Catalogs, Job};

/// Supplies the option catalogs for a session.
pub trait CatalogProvider {
    fn catalogs(&self) -> Result<Catalogs, CatalogError>;
}

/// Supplies the photos (with existing annotations) of a job.
pub trait PhotoProvider {
    fn load_job(&self) -> Result<Job, JobError>;
}

impl CatalogProvider for Catalogs {
    fn catalogs(&self) -> Result<Catalogs, CatalogError> {
        Ok(self.clone())
    }
}

impl CatalogProvider for AnnotatorConfig {
    fn catalogs(&self) -> Result<Catalogs, CatalogError> {
        self.catalogs.to_catalogs()
    }
}

impl PhotoProvider for Job {
    fn load_job(&self) -> Result<Job, JobError> {
        Ok(self.clone())
    }
}
