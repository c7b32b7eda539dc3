use crate::app_config::Gdacs;
use crate::gdacs::feed::{FeedError, parse_feed};
use crate::hazards::FeedEntry;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, instrument};

/// Reads the GDACS GeoRSS feed of global disaster alerts.
#[derive(Debug, Clone)]
pub struct GdacsClient {
    client: Client,
    config: Gdacs,
}

impl GdacsClient {
    pub fn new(client: Client, config: Gdacs) -> Self {
        GdacsClient { client, config }
    }

    #[instrument(skip(self))]
    pub async fn fetch_entries(&self) -> Result<Vec<FeedEntry>, GdacsError> {
        info!("🌍 Retrieving disaster alerts...");
        let body = self
            .client
            .get(self.config.url())
            .timeout(self.config.timeout())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let entries = parse_feed(&body)?;
        info!("🌍 Retrieving disaster alerts... OK, {} found", entries.len());
        Ok(entries)
    }
}

#[derive(Error, Debug)]
pub enum GdacsError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed feed: {0}")]
    Feed(#[from] FeedError),
}
