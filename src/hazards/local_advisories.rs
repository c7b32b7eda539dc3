use crate::domain::{GeoPoint, HazardRecord};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdvisoryEntry {
    pub key: String,
    pub coords: GeoPoint,
    pub details: String,
    pub location_name: String,
}

impl AdvisoryEntry {
    fn to_hazard(&self) -> HazardRecord {
        HazardRecord::new(self.coords, self.details.clone(), self.location_name.clone())
    }
}

/// Read-only list of regional advisories. The order of the entries decides which advisory wins when several keys match.
#[derive(Clone, Debug, Default)]
pub struct AdvisoryRegistry {
    entries: Vec<AdvisoryEntry>,
}

impl AdvisoryRegistry {
    pub fn new(entries: Vec<AdvisoryEntry>) -> Self {
        AdvisoryRegistry { entries }
    }

    /// Parses a JSON array of advisories, rejecting entries whose coordinates are not on the globe.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries = serde_json::from_str::<Vec<AdvisoryEntry>>(json)?;
        if let Some(entry) = entries.iter().find(|entry| !is_on_globe(entry.coords)) {
            return Err(RegistryError::InvalidCoordinates {
                key: entry.key.clone(),
                latitude: entry.coords.latitude,
                longitude: entry.coords.longitude,
            });
        }
        Ok(AdvisoryRegistry::new(entries))
    }

    #[instrument]
    pub async fn load_from(path: &Path) -> Result<Self, RegistryError> {
        info!("📁 Loading advisories...");
        let content = fs::read_to_string(path).await.map_err(|e| RegistryError::Io {
            source: e,
            path: path.to_path_buf(),
        })?;

        let registry = Self::from_json(&content)?;
        info!("📁 Loading advisories... OK, {} loaded", registry.len());
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[AdvisoryEntry] {
        &self.entries
    }

    /// Returns the advisory of the first registered key contained in `destination_name`, ignoring case.
    #[instrument(skip(self))]
    pub fn match_local_advisories(&self, destination_name: &str) -> Vec<HazardRecord> {
        let destination = destination_name.to_lowercase();
        let matched = self
            .entries
            .iter()
            .find(|entry| destination.contains(&entry.key.to_lowercase()));

        match matched {
            Some(entry) => {
                debug!(key = entry.key, "🔸 Destination matches a local advisory");
                vec![entry.to_hazard()]
            }
            None => Vec::new(),
        }
    }
}

fn is_on_globe(point: GeoPoint) -> bool {
    (-90.0..=90.0).contains(&point.latitude) && (-180.0..=180.0).contains(&point.longitude)
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("unable to read advisories from '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
    #[error("invalid advisories: {0}")]
    Json(#[from] serde_json::Error),
    #[error("advisory '{key}' has invalid coordinates [{latitude}, {longitude}]")]
    InvalidCoordinates { key: String, latitude: f64, longitude: f64 },
}
