use crate::domain::GeoPoint;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HazardRecord {
    pub coords: GeoPoint,
    pub details: String,
    pub location_name: String,
}

impl HazardRecord {
    pub fn new(coords: GeoPoint, details: impl Into<String>, location_name: impl Into<String>) -> Self {
        HazardRecord {
            coords,
            details: details.into(),
            location_name: location_name.into(),
        }
    }
}
