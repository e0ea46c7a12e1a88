//! Bundled sample job used by the demo binary and tests.

use crate::error::JobError;
use crate::model::Job;
use crate::provider::PhotoProvider;

/// JSON of the bundled sample job.
pub const SAMPLE_JOB_JSON: &str = include_str!("sample_job.json");

/// Photo provider backed by the bundled sample job.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleJob;

impl PhotoProvider for SampleJob {
    fn load_job(&self) -> Result<Job, JobError> {
        let job = Job::from_json(SAMPLE_JOB_JSON)?;
        if job.photos.is_empty() {
            return Err(JobError::Empty(job.id));
        }
        log::info!(
            "Loaded sample job {} ({} photos, {} annotations)",
            job.id,
            job.photos.len(),
            job.total_annotations()
        );
        Ok(job)
    }
}
