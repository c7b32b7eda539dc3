use crate::hazards::{WeatherCondition, WeatherReport};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub weather: Vec<ConditionGet>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConditionGet {
    pub id: i64,
    #[serde(default)]
    pub description: String,
}

impl From<WeatherResponse> for WeatherReport {
    /// Only the first, primary, condition is kept.
    fn from(response: WeatherResponse) -> Self {
        WeatherReport {
            condition: response.weather.into_iter().next().map(|condition| WeatherCondition {
                id: condition.id,
                description: condition.description,
            }),
            place_name: response.name,
        }
    }
}
