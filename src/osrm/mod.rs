mod client;
mod route_response;

pub use client::{OsrmClient, RoutingError};
