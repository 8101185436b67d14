//! HTTP client for the social-profile activity API.
//!
//! Returns decoded JSON only; normalization lives in `pulse-pipeline`.

pub mod client;
pub mod error;

pub use client::NimbleClient;
pub use error::ClientError;
