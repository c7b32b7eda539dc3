mod aggregator;
mod disaster_alerts;
mod distance;
mod local_advisories;
mod source_outcome;
mod weather;

pub use aggregator::{aggregate, primary_hazard};
pub use disaster_alerts::{FeedEntry, correlate_disaster_alerts};
pub use local_advisories::AdvisoryRegistry;
pub use source_outcome::{SourceError, SourceOutcome};
pub use weather::{WeatherCondition, WeatherError, WeatherLookup, WeatherReport, sample_weather_hazards};
