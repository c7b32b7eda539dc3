use crate::domain::HazardRecord;
use crate::gdacs::GdacsError;
use thiserror::Error;

/// Result of consulting a single hazard source, telling "nothing found" apart from "could not ask".
#[derive(Debug)]
pub enum SourceOutcome {
    Found(Vec<HazardRecord>),
    Unavailable(SourceError),
}

impl SourceOutcome {
    /// An unavailable source contributes no hazards.
    pub fn into_hazards(self) -> Vec<HazardRecord> {
        match self {
            SourceOutcome::Found(hazards) => hazards,
            SourceOutcome::Unavailable(_) => Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("disaster feed unavailable: {0}")]
    DisasterFeed(#[from] GdacsError),
    #[error("weather provider credential is not configured")]
    MissingCredential,
    #[error("all {0} weather lookups failed")]
    WeatherSamples(usize),
}
