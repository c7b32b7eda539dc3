mod geo_point;
mod hazard_record;
mod route_polyline;

pub use geo_point::GeoPoint;
pub use hazard_record::HazardRecord;
pub use route_polyline::RoutePolyline;
