use crate::app_config::Geocoding;
use crate::domain::GeoPoint;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

/// A geocoded place.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub point: GeoPoint,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl TryFrom<SearchResult> for Place {
    type Error = GeocodingError;

    fn try_from(result: SearchResult) -> Result<Self, Self::Error> {
        let parse = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GeocodingError::InvalidCoordinate(value.to_string()))
        };

        Ok(Place {
            point: GeoPoint::new(parse(&result.lat)?, parse(&result.lon)?),
            display_name: result.display_name,
        })
    }
}

/// Resolves free-text place names through a Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    config: Geocoding,
}

impl NominatimClient {
    pub fn new(client: Client, config: Geocoding) -> Self {
        NominatimClient { client, config }
    }

    /// Returns the best match for `query`, or `None` when nothing matches.
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Option<Place>, GeocodingError> {
        info!("📍 Geocoding '{}'...", query);
        let results = self
            .client
            .get(format!("{}/search", self.config.url()))
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .timeout(self.config.timeout())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SearchResult>>()
            .await?;

        let place = results.into_iter().next().map(Place::try_from).transpose()?;
        match &place {
            Some(place) => info!("📍 Geocoding '{}'... OK, {}", query, place.display_name),
            None => info!("📍 Geocoding '{}'... no match", query),
        }
        Ok(place)
    }
}

#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}
