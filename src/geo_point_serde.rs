use crate::domain::GeoPoint;
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Points travel as `[latitude, longitude]` pairs, both in the registry file and in the analysis output.
impl Serialize for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.latitude)?;
        tuple.serialize_element(&self.longitude)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [latitude, longitude] = <[f64; 2]>::deserialize(deserializer)?;
        if !latitude.is_finite() {
            return Err(Error::custom(format!("invalid latitude: {}, must be a finite number", latitude)));
        }

        if !longitude.is_finite() {
            return Err(Error::custom(format!("invalid longitude: {}, must be a finite number", longitude)));
        }

        Ok(GeoPoint { latitude, longitude })
    }
}
