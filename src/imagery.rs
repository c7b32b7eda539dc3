use chrono::NaiveDate;

const THERMAL_ANOMALIES_LAYER: &str = "VIIRS_SNPP_Thermal_Anomalies_375m_All";
const TRUE_COLOR_LAYER: &str = "MODIS_Terra_CorrectedReflectance_TrueColor";

/// Tile URL template of the satellite layer matching the primary hazard, for the given date.
///
/// Fire related hazards get the thermal anomalies layer, everything else the true color reflectance. The `{z}`, `{y}`
/// and `{x}` placeholders are left for the map client to fill in.
pub fn satellite_url(base_url: &str, primary_details: Option<&str>, date: NaiveDate) -> String {
    let (layer, extension) = if primary_details.is_some_and(is_fire_related) {
        (THERMAL_ANOMALIES_LAYER, "png")
    } else {
        (TRUE_COLOR_LAYER, "jpg")
    };

    format!(
        "{}/{}/default/{}/250m/{{z}}/{{y}}/{{x}}.{}",
        base_url.trim_end_matches('/'),
        layer,
        date.format("%Y-%m-%d"),
        extension
    )
}

// "wildfire" is covered by "fire"
fn is_fire_related(details: &str) -> bool {
    details.to_lowercase().contains("fire")
}
