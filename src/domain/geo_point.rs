/// A `(latitude, longitude)` pair in decimal degrees.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint { latitude, longitude }
    }

    /// Builds a point from a GeoJSON style `[longitude, latitude]` pair.
    pub fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Self {
        GeoPoint { latitude, longitude }
    }
}
