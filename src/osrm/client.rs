use crate::app_config::Routing;
use crate::domain::{GeoPoint, RoutePolyline};
use crate::osrm::route_response::RouteResponse;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, instrument};

/// Driving routes from an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    config: Routing,
}

impl OsrmClient {
    pub fn new(client: Client, config: Routing) -> Self {
        OsrmClient { client, config }
    }

    /// Returns the geometry of the first route, or `None` when the server found no route.
    #[instrument(skip(self))]
    pub async fn route(&self, start: GeoPoint, end: GeoPoint) -> Result<Option<RoutePolyline>, RoutingError> {
        info!("🛣️ Retrieving route...");
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.config.url(),
            start.longitude,
            start.latitude,
            end.longitude,
            end.latitude
        );

        let response = self
            .client
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .timeout(self.config.timeout())
            .send()
            .await?
            .error_for_status()?
            .json::<RouteResponse>()
            .await?;

        let route = polyline_of(response);
        match &route {
            Some(route) => info!("🛣️ Retrieving route... OK, {} points", route.len()),
            None => info!("🛣️ Retrieving route... no route found"),
        }
        Ok(route)
    }
}

fn polyline_of(response: RouteResponse) -> Option<RoutePolyline> {
    let first = response.routes.into_iter().next()?;
    let points = first.geometry.coordinates.into_iter().map(GeoPoint::from_lon_lat).collect();
    RoutePolyline::new(points).ok()
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}
