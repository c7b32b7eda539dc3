mod client;
mod feed;

pub use client::{GdacsClient, GdacsError};
