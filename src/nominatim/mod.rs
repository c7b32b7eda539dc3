mod client;

pub use client::{GeocodingError, NominatimClient};
