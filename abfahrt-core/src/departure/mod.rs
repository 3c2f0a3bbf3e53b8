//! Departure records and selection
//!
//! The feed is a time-ordered list of upcoming departures. Each display
//! row shows one entry chosen from it by [`select`].

pub mod record;
pub mod select;

pub use record::{DepartureRecord, Destination, DisplayedDeparture, Feed, FEED_CAPACITY, MAX_DESTINATION_LEN};
pub use select::{choose_departures, select, Selection};
