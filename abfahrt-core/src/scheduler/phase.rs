//! Scheduler phases and tick outcomes

use crate::traits::FeedError;

/// What a tick does, decided by the refresh countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Redraw from the cached feed and advance the marquee
    Refresh,
    /// Fetch a new feed, then redraw without advancing the marquee
    Fetch,
}

impl Phase {
    /// Phase for a given countdown value
    pub const fn from_countdown(countdown: u8) -> Self {
        if countdown > 0 {
            Phase::Refresh
        } else {
            Phase::Fetch
        }
    }
}

/// Result of a feed update attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Feed replaced with `departures` entries
    Updated { departures: usize },
    /// Fetch or parse failed, previous feed kept
    Kept(FeedError),
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReport {
    /// Link down, nothing touched
    Offline,
    /// Redrawn from cache at scroll position `scroll`
    Refreshed { scroll: u8 },
    /// Feed update attempted and display redrawn
    Fetched(FetchOutcome),
}
