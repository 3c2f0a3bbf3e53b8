//! MVG departure API format
//!
//! The `fib/v1/departure` endpoint returns a JSON array of departure
//! objects. Only three fields are used:
//!
//! ```json
//! [{"destination": "Klinikum Großhadern",
//!   "plannedDepartureTime": 1717000290000,
//!   "realtimeDepartureTime": 1717000300000, ...}]
//! ```
//!
//! Times are unix milliseconds. Everything else is ignored.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;
use serde_json::error::Category;

use abfahrt_core::departure::{DepartureRecord, Feed, FEED_CAPACITY};
use abfahrt_core::traits::{FeedError, FeedFormat, ParseError};

/// One departure as sent on the wire
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDeparture {
    destination: String,
    /// Absent times read as 0
    #[serde(default)]
    planned_departure_time: i64,
    #[serde(default)]
    realtime_departure_time: i64,
}

/// MVG JSON feed decoder
///
/// Entries beyond `FEED_CAPACITY` are dropped; the request limit keeps
/// the server below that anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct MvgFormat;

impl MvgFormat {
    /// Create a decoder
    pub const fn new() -> Self {
        Self
    }
}

impl FeedFormat for MvgFormat {
    fn parse(&self, raw: &[u8]) -> Result<Feed, FeedError> {
        let wire: Vec<WireDeparture> = serde_json::from_slice(raw).map_err(classify)?;

        Ok(wire
            .iter()
            .take(FEED_CAPACITY)
            .map(|d| {
                DepartureRecord::from_millis(
                    &d.destination,
                    d.planned_departure_time,
                    d.realtime_departure_time,
                )
            })
            .collect())
    }
}

fn classify(error: serde_json::Error) -> FeedError {
    let kind = match error.classify() {
        Category::Data => ParseError::Data,
        Category::Eof => ParseError::Eof,
        Category::Syntax | Category::Io => ParseError::Syntax,
    };
    FeedError::Parse(kind)
}
