use crate::app_config::Weather;
use crate::domain::GeoPoint;
use crate::hazards::{WeatherError, WeatherLookup, WeatherReport};
use crate::openweather::weather_response::WeatherResponse;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

/// Current weather lookups against the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: Weather,
    api_key: String,
}

impl OpenWeatherClient {
    /// Returns `None` when no API key is configured, as no lookup can succeed without one.
    pub fn new(client: Client, config: Weather) -> Option<Self> {
        let api_key = config.api_key()?.to_string();
        Some(OpenWeatherClient { client, config, api_key })
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, point: GeoPoint) -> Result<WeatherReport, WeatherError> {
        let body = self
            .client
            .get(self.config.url())
            .query(&[
                ("lat", point.latitude.to_string()),
                ("lon", point.longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .timeout(self.config.timeout())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response = serde_json::from_str::<WeatherResponse>(&body)?;
        debug!("🌦️ Weather at {:?}: {:?}", point, response);
        Ok(response.into())
    }
}
