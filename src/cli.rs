use crate::analyzer::{RouteRequest, StartLocation};
use crate::domain::GeoPoint;
use clap::Parser;
use thiserror::Error;

/// Reports the hazards along a driving route.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Name of the start location
    #[arg(long, conflicts_with_all = ["start_lat", "start_lon"], required_unless_present_all = ["start_lat", "start_lon"])]
    pub start: Option<String>,

    /// Latitude of the start location, e.g. the current position
    #[arg(long, requires = "start_lon", allow_negative_numbers = true)]
    pub start_lat: Option<f64>,

    /// Longitude of the start location
    #[arg(long, requires = "start_lat", allow_negative_numbers = true)]
    pub start_lon: Option<f64>,

    /// Name of the destination
    #[arg(long)]
    pub end: String,

    /// Configuration file, without extension
    #[arg(long, default_value = "config")]
    pub config: String,
}

impl Cli {
    pub fn route_request(&self) -> Result<RouteRequest, MissingStartError> {
        let start = match (&self.start, self.start_lat, self.start_lon) {
            (Some(name), _, _) => StartLocation::Named(name.clone()),
            (None, Some(latitude), Some(longitude)) => StartLocation::Coordinates(GeoPoint::new(latitude, longitude)),
            _ => return Err(MissingStartError),
        };

        Ok(RouteRequest {
            start,
            end: self.end.clone(),
        })
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("start location not provided")]
pub struct MissingStartError;
