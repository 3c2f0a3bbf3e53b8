//! Fetch/display scheduler
//!
//! Drives the once-per-second loop: most ticks redraw from the cached
//! feed with the marquee advanced, every `REFRESH_TICKS + 1`th tick
//! fetches a fresh feed first.

pub mod executor;
pub mod phase;

pub use executor::Scheduler;
pub use phase::{FetchOutcome, Phase, TickReport};
