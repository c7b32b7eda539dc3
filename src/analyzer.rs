use crate::app_config::AppConfig;
use crate::domain::{GeoPoint, HazardRecord, RoutePolyline};
use crate::gdacs::GdacsClient;
use crate::hazards::{
    AdvisoryRegistry, SourceError, SourceOutcome, aggregate, correlate_disaster_alerts, primary_hazard, sample_weather_hazards,
};
use crate::imagery::satellite_url;
use crate::nominatim::{GeocodingError, NominatimClient};
use crate::openweather::OpenWeatherClient;
use crate::osrm::{OsrmClient, RoutingError};
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const CURRENT_LOCATION_NAME: &str = "Your Current Location";

#[derive(Clone, Debug, PartialEq)]
pub enum StartLocation {
    Named(String),
    Coordinates(GeoPoint),
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub start: StartLocation,
    pub end: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteAnalysis {
    pub start_name: String,
    pub end_name: String,
    pub route: Vec<GeoPoint>,
    pub hazards: Vec<HazardRecord>,
    pub satellite_url: String,
}

/// Resolves a route between two places and correlates it against every hazard source.
#[derive(Debug)]
pub struct RouteAnalyzer {
    geocoder: NominatimClient,
    router: OsrmClient,
    registry: AdvisoryRegistry,
    gdacs: GdacsClient,
    weather: Option<OpenWeatherClient>,
    imagery_url: String,
}

impl RouteAnalyzer {
    pub fn new(client: Client, config: &AppConfig, registry: AdvisoryRegistry) -> Self {
        let weather = OpenWeatherClient::new(client.clone(), config.weather().clone());
        if weather.is_none() {
            warn!("⚠️ No weather API key configured, weather alerts are disabled");
        }

        RouteAnalyzer {
            geocoder: NominatimClient::new(client.clone(), config.geocoding().clone()),
            router: OsrmClient::new(client.clone(), config.routing().clone()),
            registry,
            gdacs: GdacsClient::new(client, config.gdacs().clone()),
            weather,
            imagery_url: config.imagery().url().to_string(),
        }
    }

    pub async fn analyze(&self, request: &RouteRequest) -> Result<RouteAnalysis, AnalysisError> {
        self.analyze_on(request, Local::now().date_naive()).await
    }

    #[instrument(skip(self))]
    async fn analyze_on(&self, request: &RouteRequest, date: NaiveDate) -> Result<RouteAnalysis, AnalysisError> {
        let (start, start_name) = match &request.start {
            StartLocation::Named(name) => {
                let place = self
                    .geocoder
                    .geocode(name)
                    .await?
                    .ok_or_else(|| AnalysisError::StartNotFound(name.clone()))?;
                (place.point, place.display_name)
            }
            StartLocation::Coordinates(point) => (*point, CURRENT_LOCATION_NAME.to_string()),
        };

        let end = self
            .geocoder
            .geocode(&request.end)
            .await?
            .ok_or_else(|| AnalysisError::DestinationNotFound(request.end.clone()))?;

        let route = self.router.route(start, end.point).await?.ok_or(AnalysisError::NoRoute)?;

        let hazards = self.hazards_along(&route, &end.display_name).await;
        let satellite_url = satellite_url(
            &self.imagery_url,
            primary_hazard(&hazards).map(|hazard| hazard.details.as_str()),
            date,
        );

        Ok(RouteAnalysis {
            start_name,
            end_name: end.display_name,
            route: route.points().to_vec(),
            hazards,
            satellite_url,
        })
    }

    /// Collects the hazards of every source. A source that cannot be consulted contributes nothing.
    #[instrument(skip(self, route), fields(points = route.len()))]
    pub async fn hazards_along(&self, route: &RoutePolyline, destination_name: &str) -> Vec<HazardRecord> {
        let local = SourceOutcome::Found(self.registry.match_local_advisories(destination_name));
        let (disaster, weather) = tokio::join!(self.disaster_alerts(route), self.weather_alerts(route));

        log_outcome("local advisories", &local);
        log_outcome("disaster alerts", &disaster);
        log_outcome("weather alerts", &weather);

        aggregate(local.into_hazards(), disaster.into_hazards(), weather.into_hazards())
    }

    async fn disaster_alerts(&self, route: &RoutePolyline) -> SourceOutcome {
        match self.gdacs.fetch_entries().await {
            Ok(entries) => SourceOutcome::Found(correlate_disaster_alerts(route, &entries)),
            Err(e) => SourceOutcome::Unavailable(e.into()),
        }
    }

    async fn weather_alerts(&self, route: &RoutePolyline) -> SourceOutcome {
        match &self.weather {
            Some(weather) => sample_weather_hazards(route, weather).await,
            None => SourceOutcome::Unavailable(SourceError::MissingCredential),
        }
    }
}

fn log_outcome(source: &str, outcome: &SourceOutcome) {
    match outcome {
        SourceOutcome::Found(hazards) => info!(source, "🔎 {} hazard(s) from {}", hazards.len(), source),
        SourceOutcome::Unavailable(e) => warn!(source, "⚠️ Skipping {}: {}", source, e),
    }
}

/// Failures that leave no route to analyze.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("could not find start location '{0}'")]
    StartNotFound(String),
    #[error("could not find destination '{0}'")]
    DestinationNotFound(String),
    #[error("geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),
    #[error("could not fetch route from routing service: {0}")]
    Routing(#[from] RoutingError),
    #[error("could not find a route between locations")]
    NoRoute,
}

impl AnalysisError {
    /// HTTP status matching the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalysisError::StartNotFound(_) | AnalysisError::DestinationNotFound(_) | AnalysisError::NoRoute => 404,
            AnalysisError::Geocoding(_) | AnalysisError::Routing(_) => 500,
        }
    }
}
