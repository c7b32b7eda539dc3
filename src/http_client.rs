use crate::app_config::AppConfig;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

/// Shared client for every external service, identifying itself with the configured user agent.
pub fn new_client(config: &AppConfig) -> Result<Client, HttpClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_str(config.http().user_agent())?);

    let client = Client::builder().default_headers(headers).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("invalid user agent: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}
