//! Response document parsing

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{GeoNamesError, Result, ServiceError};
use crate::fields::map_entry;
use crate::types::GeoNamesPage;

/// Raw response document (internal)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    status: Option<RawStatus>,
    total_results_count: Option<u64>,
    geonames: Option<Vec<Map<String, Value>>>,
}

/// Raw error status (internal)
#[derive(Debug, Deserialize)]
struct RawStatus {
    #[serde(alias = "code")]
    value: u16,
    #[serde(default)]
    message: String,
}

/// Parse a complete response body into a page of records
///
/// A `status` root becomes [`GeoNamesError::Service`]. A body with neither a
/// `status` nor a `geonames` root is reported as malformed.
pub fn parse_response(body: &[u8]) -> Result<GeoNamesPage> {
    let raw: RawResponse = serde_json::from_slice(body)?;

    if let Some(status) = raw.status {
        let err = ServiceError::new(status.value, status.message);
        warn!(code = err.code, message = %err.message, "GeoNames returned error");
        return Err(GeoNamesError::Service(err));
    }

    let Some(entries) = raw.geonames else {
        return Err(GeoNamesError::MalformedResponse(
            "response has neither status nor geonames".to_string(),
        ));
    };

    let geonames: Vec<_> = entries.iter().map(map_entry).collect();
    // findNearbyPlaceName and findNearbyWikipedia omit the count
    let total_results_count = raw
        .total_results_count
        .unwrap_or(geonames.len() as u64);

    debug!(
        returned = geonames.len(),
        total = total_results_count,
        "Parsed GeoNames response"
    );

    Ok(GeoNamesPage {
        geonames,
        total_results_count,
    })
}
