use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<RouteGet>,
}

#[derive(Debug, Deserialize)]
pub struct RouteGet {
    pub geometry: Geometry,
}

/// GeoJSON line string, coordinates are `[longitude, latitude]`.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}
