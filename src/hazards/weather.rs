use crate::domain::{GeoPoint, HazardRecord, RoutePolyline};
use crate::hazards::source_outcome::{SourceError, SourceOutcome};
use async_trait::async_trait;
use futures::future::join_all;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Condition codes from thunderstorms up to, but excluding, clear sky.
pub const HAZARDOUS_CONDITIONS: Range<i64> = 200..800;
pub const FALLBACK_LOCATION: &str = "Along your route";

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherCondition {
    pub id: i64,
    pub description: String,
}

/// Current conditions at a single point as reported by the weather provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherReport {
    pub condition: Option<WeatherCondition>,
    pub place_name: Option<String>,
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current_weather(&self, point: GeoPoint) -> Result<WeatherReport, WeatherError>;
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed weather payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub fn is_hazardous(condition_id: i64) -> bool {
    HAZARDOUS_CONDITIONS.contains(&condition_id)
}

pub fn classify(point: GeoPoint, report: WeatherReport) -> Option<HazardRecord> {
    let condition = report.condition.filter(|c| is_hazardous(c.id))?;
    let location_name = report.place_name.unwrap_or_else(|| FALLBACK_LOCATION.to_string());

    Some(HazardRecord::new(
        point,
        format!("Weather Alert: {}", condition.description),
        location_name,
    ))
}

/// Looks up the weather at the start, middle and end of the route and keeps the hazardous ones in that order.
///
/// A failed lookup only drops its own sample. The source is reported unavailable when every sample failed.
#[instrument(skip_all, fields(points = route.len()))]
pub async fn sample_weather_hazards<W>(route: &RoutePolyline, lookup: &W) -> SourceOutcome
where
    W: WeatherLookup + ?Sized,
{
    let samples = route.sample_points();
    let results = join_all(samples.iter().map(|point| lookup.current_weather(*point))).await;

    let mut failures = 0;
    let mut hazards = Vec::new();
    for (point, result) in samples.into_iter().zip(results) {
        match result {
            Ok(report) => {
                debug!(latitude = point.latitude, longitude = point.longitude, "🔸 Weather report: {:?}", report);
                hazards.extend(classify(point, report));
            }
            Err(e) => {
                warn!(latitude = point.latitude, longitude = point.longitude, "⚠️ Weather lookup failed: {}", e);
                failures += 1;
            }
        }
    }

    if failures == samples.len() {
        return SourceOutcome::Unavailable(SourceError::WeatherSamples(failures));
    }
    SourceOutcome::Found(hazards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::Mutex;

    /// Answers lookups from a fixed list of responses, in call order.
    struct ScriptedWeather {
        responses: Mutex<Vec<Option<WeatherReport>>>,
        requested: Mutex<Vec<GeoPoint>>,
    }

    impl ScriptedWeather {
        fn new(mut responses: Vec<Option<WeatherReport>>) -> Self {
            responses.reverse();
            ScriptedWeather {
                responses: Mutex::new(responses),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WeatherLookup for ScriptedWeather {
        async fn current_weather(&self, point: GeoPoint) -> Result<WeatherReport, WeatherError> {
            self.requested.lock().unwrap().push(point);
            match self.responses.lock().unwrap().pop().flatten() {
                Some(report) => Ok(report),
                None => Err(WeatherError::Payload(serde_json::from_str::<serde_json::Value>("{").unwrap_err())),
            }
        }
    }

    fn report(id: i64, description: &str, place_name: Option<&str>) -> WeatherReport {
        WeatherReport {
            condition: Some(WeatherCondition {
                id,
                description: description.to_string(),
            }),
            place_name: place_name.map(str::to_string),
        }
    }

    fn seven_point_route() -> RoutePolyline {
        RoutePolyline::new((0..7).map(|i| GeoPoint::new(30.0 + i as f64, 77.0)).collect()).unwrap()
    }

    #[rstest]
    #[case::reserved(199, false)]
    #[case::thunderstorm(200, true)]
    #[case::rain(501, true)]
    #[case::tornado(781, true)]
    #[case::last_atmosphere(799, true)]
    #[case::clear(800, false)]
    #[case::clouds(804, false)]
    #[case::negative(-1, false)]
    fn is_hazardous_covers_200_up_to_800(#[case] id: i64, #[case] expected: bool) {
        assert_eq!(is_hazardous(id), expected);
    }

    #[test]
    fn classify_builds_a_weather_alert() {
        let point = GeoPoint::new(31.1, 77.1);

        let hazard = classify(point, report(501, "moderate rain", Some("Shimla")));

        assert_eq!(hazard, Some(HazardRecord::new(point, "Weather Alert: moderate rain", "Shimla")));
    }

    #[rstest]
    #[case::missing(None, "Along your route")]
    #[case::empty(Some(""), "")]
    #[case::named(Some("Kufri"), "Kufri")]
    fn classify_only_falls_back_when_the_place_is_missing(#[case] place_name: Option<&str>, #[case] expected: &str) {
        let hazard = classify(GeoPoint::default(), report(200, "thunderstorm with light rain", place_name));

        assert_eq!(hazard.map(|h| h.location_name), Some(expected.to_string()));
    }

    #[rstest]
    #[case::clear_sky(report(800, "clear sky", Some("Shimla")))]
    #[case::no_condition(WeatherReport { condition: None, place_name: Some("Shimla".to_string()) })]
    fn classify_ignores_harmless_reports(#[case] weather: WeatherReport) {
        assert_eq!(classify(GeoPoint::default(), weather), None);
    }

    #[test_log::test(tokio::test)]
    async fn sample_weather_hazards_looks_up_start_middle_and_end() {
        let lookup = ScriptedWeather::new(vec![
            Some(report(800, "clear sky", None)),
            Some(report(800, "clear sky", None)),
            Some(report(800, "clear sky", None)),
        ]);

        sample_weather_hazards(&seven_point_route(), &lookup).await;

        let requested = lookup.requested.lock().unwrap().iter().map(|p| p.latitude).collect::<Vec<_>>();
        assert_eq!(requested, vec![30.0, 33.0, 36.0]);
    }

    #[test_log::test(tokio::test)]
    async fn sample_weather_hazards_keeps_hazards_in_sample_order() {
        let lookup = ScriptedWeather::new(vec![
            Some(report(501, "moderate rain", Some("Start"))),
            Some(report(800, "clear sky", Some("Middle"))),
            Some(report(601, "snow", Some("End"))),
        ]);

        let hazards = sample_weather_hazards(&seven_point_route(), &lookup).await.into_hazards();

        assert_eq!(
            hazards,
            vec![
                HazardRecord::new(GeoPoint::new(30.0, 77.0), "Weather Alert: moderate rain", "Start"),
                HazardRecord::new(GeoPoint::new(36.0, 77.0), "Weather Alert: snow", "End"),
            ]
        );
    }

    #[test_log::test(tokio::test)]
    async fn sample_weather_hazards_skips_a_failed_sample() {
        let lookup = ScriptedWeather::new(vec![
            Some(report(501, "moderate rain", None)),
            None,
            Some(report(502, "heavy intensity rain", None)),
        ]);

        let outcome = sample_weather_hazards(&seven_point_route(), &lookup).await;

        assert!(matches!(&outcome, SourceOutcome::Found(hazards) if hazards.len() == 2), "unexpected outcome {:?}", outcome);
    }

    #[test_log::test(tokio::test)]
    async fn sample_weather_hazards_is_unavailable_when_every_sample_fails() {
        let lookup = ScriptedWeather::new(vec![None, None, None]);

        let outcome = sample_weather_hazards(&seven_point_route(), &lookup).await;

        assert!(matches!(outcome, SourceOutcome::Unavailable(SourceError::WeatherSamples(3))));
    }

    #[test_log::test(tokio::test)]
    async fn sample_weather_hazards_samples_a_single_point_route_three_times() {
        let point = GeoPoint::new(31.1, 77.1);
        let route = RoutePolyline::new(vec![point]).unwrap();
        let lookup = ScriptedWeather::new(vec![
            Some(report(300, "drizzle", None)),
            Some(report(300, "drizzle", None)),
            Some(report(300, "drizzle", None)),
        ]);

        let hazards = sample_weather_hazards(&route, &lookup).await.into_hazards();

        assert_eq!(*lookup.requested.lock().unwrap(), vec![point, point, point]);
        assert_eq!(hazards.len(), 3);
    }
}
