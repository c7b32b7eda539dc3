use crate::domain::{GeoPoint, HazardRecord, RoutePolyline};
use crate::hazards::distance::distance_km;

pub const NEAR_ROUTE_KM: f64 = 50.0;
pub const NEAR_ROUTE_LOCATION: &str = "Near your route";

// Absorbs the rounding of the haversine computation so a point exactly 50 km away stays outside.
const BOUNDARY_TOLERANCE_KM: f64 = 1e-9;

/// A single item of the disaster alert feed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub point: Option<GeoPoint>,
}

pub fn is_near_route(distance_km: f64) -> bool {
    distance_km < NEAR_ROUTE_KM - BOUNDARY_TOLERANCE_KM
}

/// Emits one hazard per located feed entry lying near any route point, in feed order.
///
/// The route points are scanned in order and the first one within range settles the entry, there is no search for the
/// nearest point. Proximity is measured to the route vertices only, not to the segments between them.
pub fn correlate_disaster_alerts(route: &RoutePolyline, entries: &[FeedEntry]) -> Vec<HazardRecord> {
    entries
        .iter()
        .filter_map(|entry| {
            let point = entry.point?;
            route
                .points()
                .iter()
                .any(|route_point| is_near_route(distance_km(*route_point, point)))
                .then(|| HazardRecord::new(point, entry.title.clone(), NEAR_ROUTE_LOCATION))
        })
        .collect()
}
