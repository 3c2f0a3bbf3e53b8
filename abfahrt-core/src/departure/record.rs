//! Feed and display record types

use heapless::{String, Vec};

use crate::config::{MAX_GLYPHS, PLACEHOLDER_DESTINATION};

/// Maximum destination length in bytes (UTF-8)
///
/// Every glyph consumes at most two bytes, so any name cut here still
/// fills the `MAX_GLYPHS` transcode buffer.
pub const MAX_DESTINATION_LEN: usize = 2 * MAX_GLYPHS + 2;

/// Maximum departures kept from one feed response
pub const FEED_CAPACITY: usize = 16;

/// Destination name as received from the feed
pub type Destination = String<MAX_DESTINATION_LEN>;

/// Current feed snapshot, sorted ascending by realtime departure
pub type Feed = Vec<DepartureRecord, FEED_CAPACITY>;

/// One upcoming departure from the feed
///
/// Instants are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRecord {
    /// Final stop of the train
    pub destination: Destination,
    /// Timetable departure
    pub planned_departure: i64,
    /// Predicted departure including delay
    pub realtime_departure: i64,
}

impl DepartureRecord {
    /// Create a record, truncating the destination to `MAX_DESTINATION_LEN`
    pub fn new(destination: &str, planned_departure: i64, realtime_departure: i64) -> Self {
        Self {
            destination: truncate_destination(destination),
            planned_departure,
            realtime_departure,
        }
    }

    /// Create a record from feed timestamps in milliseconds
    ///
    /// Milliseconds are truncated toward zero.
    pub fn from_millis(destination: &str, planned_ms: i64, realtime_ms: i64) -> Self {
        Self::new(destination, planned_ms / 1000, realtime_ms / 1000)
    }
}

/// Copy a destination into a bounded string, cutting on a char boundary
pub fn truncate_destination(text: &str) -> Destination {
    let mut end = text.len().min(MAX_DESTINATION_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    let mut destination = String::new();
    // Cannot fail: end <= capacity
    let _ = destination.push_str(&text[..end]);
    destination
}

/// Departure shown on one display row
///
/// Rebuilt from the feed on every tick, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedDeparture {
    /// Destination to render
    pub destination: Destination,
    /// Predicted departure (unix seconds), 0 for the placeholder
    pub realtime_departure: i64,
    /// Timetable departure (unix seconds), 0 for the placeholder
    pub planned_departure: i64,
}

impl DisplayedDeparture {
    /// Row content when no departure qualifies
    pub fn placeholder() -> Self {
        Self {
            destination: truncate_destination(PLACEHOLDER_DESTINATION),
            realtime_departure: 0,
            planned_departure: 0,
        }
    }
}

impl Default for DisplayedDeparture {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl From<&DepartureRecord> for DisplayedDeparture {
    fn from(record: &DepartureRecord) -> Self {
        Self {
            destination: record.destination.clone(),
            realtime_departure: record.realtime_departure,
            planned_departure: record.planned_departure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis_truncates() {
        let record = DepartureRecord::from_millis("Garching", 1_700_000_000_999, 1_700_000_060_500);
        assert_eq!(record.planned_departure, 1_700_000_000);
        assert_eq!(record.realtime_departure, 1_700_000_060);
    }

    #[test]
    fn test_destination_truncation_on_char_boundary() {
        // One byte short of the limit, then a two-byte ü straddling it
        let mut text = "a".repeat(MAX_DESTINATION_LEN - 1);
        text.push('ü');
        let destination = truncate_destination(&text);
        assert_eq!(destination.len(), MAX_DESTINATION_LEN - 1);
        assert!(destination.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_long_destination_kept_whole() {
        let text = "x".repeat(MAX_GLYPHS);
        let record = DepartureRecord::new(&text, 0, 0);
        assert_eq!(record.destination.as_str(), text);

        // All umlauts: two bytes per glyph
        let text = "ü".repeat(MAX_GLYPHS);
        assert_eq!(truncate_destination(&text).as_str(), text);
    }

    #[test]
    fn test_short_destination_kept() {
        assert_eq!(truncate_destination("Fröttmaning").as_str(), "Fröttmaning");
    }

    #[test]
    fn test_placeholder() {
        let placeholder = DisplayedDeparture::placeholder();
        assert_eq!(placeholder.destination.as_str(), "Laufen...");
        assert_eq!(placeholder.realtime_departure, 0);
        assert_eq!(placeholder.planned_departure, 0);
    }

    #[test]
    fn test_displayed_from_record() {
        let record = DepartureRecord::new("Klinikum Großhadern", 1000, 1120);
        let shown = DisplayedDeparture::from(&record);
        assert_eq!(shown.destination, record.destination);
        assert_eq!(shown.planned_departure, 1000);
        assert_eq!(shown.realtime_departure, 1120);
    }
}
