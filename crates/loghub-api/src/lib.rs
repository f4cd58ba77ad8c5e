//! HTTP query client for the LogHub API

mod client;
mod config;
mod error;

pub use client::{HEADER_API_KEY, LogApiClient};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::FetchError;
