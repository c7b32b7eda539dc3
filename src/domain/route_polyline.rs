use crate::domain::GeoPoint;
use thiserror::Error;

/// Ordered path from start to end, always holding at least one point.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePolyline {
    points: Vec<GeoPoint>,
}

impl RoutePolyline {
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, EmptyRouteError> {
        if points.is_empty() {
            return Err(EmptyRouteError);
        }
        Ok(RoutePolyline { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Indices of the start, middle and end points. They collapse onto the same index for a single point route.
    pub fn sample_indices(&self) -> [usize; 3] {
        let len = self.points.len();
        [0, len / 2, len - 1]
    }

    pub fn sample_points(&self) -> [GeoPoint; 3] {
        self.sample_indices().map(|index| self.points[index])
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("a route needs at least one point")]
pub struct EmptyRouteError;
