use crate::domain::HazardRecord;

/// Concatenates the hazards as local advisories, then disaster alerts, then weather alerts.
pub fn aggregate(local: Vec<HazardRecord>, disaster: Vec<HazardRecord>, weather: Vec<HazardRecord>) -> Vec<HazardRecord> {
    let mut hazards = Vec::with_capacity(local.len() + disaster.len() + weather.len());
    hazards.extend(local);
    hazards.extend(disaster);
    hazards.extend(weather);
    hazards
}

/// The primary hazard is the first one of the aggregated list.
pub fn primary_hazard(hazards: &[HazardRecord]) -> Option<&HazardRecord> {
    hazards.first()
}
