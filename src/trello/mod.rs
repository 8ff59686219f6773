//! Trello REST API access.
//!
//! This module contains the resource fetcher used by the navigation core:
//! request descriptors, the `Fetch` seam with its reqwest implementation, and
//! the typed resources decoded from responses.

mod client;
mod endpoint;
mod error;
mod resource;

pub use client::{Fetch, TrelloClient};
pub use endpoint::Endpoint;
pub use error::FetchError;
pub use resource::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Default base URL of the Trello REST API.
///
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Decode a fetched payload into the expected resource type.
///
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FetchError> {
    Ok(serde_json::from_value(value)?)
}
