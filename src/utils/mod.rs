//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;
use crate::models::FetcherConfig;

/// Build the bus-location URL for a station id.
///
/// `<base>?startId=<id>&sort=<sort>`; the id is substituted as-is
/// (percent-encoded, not validated).
pub fn station_url(config: &FetcherConfig, station_id: &str) -> Result<String> {
    let mut url = Url::parse(&config.base_url)?;
    url.query_pairs_mut()
        .clear()
        .append_pair("startId", station_id)
        .append_pair("sort", &config.sort);
    Ok(url.to_string())
}
