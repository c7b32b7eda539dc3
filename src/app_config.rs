use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    advisories: Advisories,
    http: Http,
    geocoding: Geocoding,
    routing: Routing,
    gdacs: Gdacs,
    weather: Weather,
    imagery: Imagery,
}

impl AppConfig {
    /// Layers `<name>.toml`, the optional `<name>_local.toml` and `SATWATCH__SECTION__KEY` environment variables.
    pub fn load(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name(name).required(true))
            .add_source(config::File::with_name(&format!("{}_local", name)).required(false))
            .add_source(config::Environment::with_prefix("SATWATCH").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn advisories(&self) -> &Advisories {
        &self.advisories
    }

    pub fn http(&self) -> &Http {
        &self.http
    }

    pub fn geocoding(&self) -> &Geocoding {
        &self.geocoding
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    pub fn gdacs(&self) -> &Gdacs {
        &self.gdacs
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn imagery(&self) -> &Imagery {
        &self.imagery
    }
}

#[derive(Debug, Deserialize)]
pub struct Advisories {
    file: PathBuf,
}

impl Advisories {
    pub fn file(&self) -> &Path {
        &self.file
    }
}

#[derive(Debug, Deserialize)]
pub struct Http {
    user_agent: String,
}

impl Http {
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geocoding {
    url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Geocoding {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Routing {
    url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Routing {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gdacs {
    url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Gdacs {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Weather {
    url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    #[serde(default)]
    api_key: Option<String>,
}

impl Weather {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured API key, treating a blank key as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct Imagery {
    url: String,
}

impl Imagery {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                advisories: Advisories {
                    file: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/advisories.json")),
                },
                http: Http {
                    user_agent: "satwatch-test/1.0".to_string(),
                },
                geocoding: Geocoding {
                    url: "https://nominatim.url".to_string(),
                    timeout: Duration::from_secs(5),
                },
                routing: Routing {
                    url: "https://osrm.url".to_string(),
                    timeout: Duration::from_secs(5),
                },
                gdacs: Gdacs {
                    url: "https://gdacs.url/rss.aspx".to_string(),
                    timeout: Duration::from_secs(10),
                },
                weather: Weather {
                    url: "https://openweathermap.url/data/2.5/weather".to_string(),
                    timeout: Duration::from_secs(5),
                    api_key: Some("key".to_string()),
                },
                imagery: Imagery {
                    url: "https://gibs.url/wmts".to_string(),
                },
            },
        }
    }

    /// Points every external service at the same mock server.
    pub fn server_url(self, url: &str) -> Self {
        self.geocoding_url(url.to_string())
            .routing_url(url.to_string())
            .gdacs_url(format!("{}/rss.aspx", url))
            .weather_url(format!("{}/data/2.5/weather", url))
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.config.http.user_agent = user_agent.to_string();
        self
    }

    pub fn geocoding_url(mut self, url: String) -> Self {
        self.config.geocoding.url = url;
        self
    }

    pub fn routing_url(mut self, url: String) -> Self {
        self.config.routing.url = url;
        self
    }

    pub fn gdacs_url(mut self, url: String) -> Self {
        self.config.gdacs.url = url;
        self
    }

    pub fn weather_url(mut self, url: String) -> Self {
        self.config.weather.url = url;
        self
    }

    pub fn weather_api_key(mut self, api_key: Option<&str>) -> Self {
        self.config.weather.api_key = api_key.map(str::to_string);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
