mod client;
mod weather_response;

pub use client::OpenWeatherClient;
