//! Departure selection
//!
//! Picks the next departures that are still worth walking to: anything
//! leaving within the grace window is skipped even though it has not
//! left yet.

use super::record::{DepartureRecord, DisplayedDeparture};
use crate::config::{GRACE_WINDOW_S, ROWS};

/// Outcome of one selection scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Departure to show (placeholder when exhausted)
    pub departure: DisplayedDeparture,
    /// Feed index of the match, 0 when exhausted
    pub index: usize,
    /// No entry at or after the start offset qualified
    pub exhausted: bool,
}

impl Selection {
    fn exhausted() -> Self {
        Self {
            departure: DisplayedDeparture::placeholder(),
            index: 0,
            exhausted: true,
        }
    }
}

/// Select the first departure after `start_offset` leaving later than
/// `current_time + GRACE_WINDOW_S`
///
/// The feed is expected to be sorted by realtime departure; it is scanned
/// in order and never re-sorted. An offset past the end yields the
/// placeholder.
pub fn select(current_time: i64, feed: &[DepartureRecord], start_offset: usize) -> Selection {
    let cutoff = current_time.saturating_add(GRACE_WINDOW_S);

    feed.iter()
        .enumerate()
        .skip(start_offset)
        .find(|(_, record)| record.realtime_departure > cutoff)
        .map(|(index, record)| Selection {
            departure: DisplayedDeparture::from(record),
            index,
            exhausted: false,
        })
        .unwrap_or_else(Selection::exhausted)
}

/// Choose the departures for both display rows
///
/// Row 1 resumes scanning strictly after row 0's match, so the rows never
/// show the same feed entry. If row 0 found nothing, row 1 is the
/// placeholder as well rather than rescanning from the start.
pub fn choose_departures(current_time: i64, feed: &[DepartureRecord]) -> [DisplayedDeparture; ROWS] {
    let first = select(current_time, feed, 0);
    let second = if first.exhausted {
        Selection::exhausted()
    } else {
        select(current_time, feed, first.index + 1)
    };

    [first.departure, second.departure]
}
