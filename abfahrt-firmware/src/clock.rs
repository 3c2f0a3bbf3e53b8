//! Wall clock
//!
//! Unix time is learned over SNTP and carried forward with the embassy
//! monotonic timer between syncs.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;

use abfahrt_core::traits::Clock;

/// Shared wall clock, set by the SNTP task and read by the display task
pub static CLOCK: SyncedClock = SyncedClock::new();

#[derive(Clone, Copy)]
struct Anchor {
    unix: i64,
    at: Instant,
}

/// Monotonic clock anchored to the last SNTP reply
pub struct SyncedClock {
    anchor: Mutex<CriticalSectionRawMutex, Cell<Option<Anchor>>>,
}

impl SyncedClock {
    /// Create an unsynchronized clock
    pub const fn new() -> Self {
        Self {
            anchor: Mutex::new(Cell::new(None)),
        }
    }

    /// Record that it is `unix` seconds right now
    pub fn set(&self, unix: i64) {
        let anchor = Anchor {
            unix,
            at: Instant::now(),
        };
        self.anchor.lock(|cell| cell.set(Some(anchor)));
    }

    /// Check if at least one sync has happened
    pub fn is_synced(&self) -> bool {
        self.anchor.lock(|cell| cell.get().is_some())
    }
}

impl Clock for SyncedClock {
    /// Unix seconds, or 0 before the first sync
    fn now(&self) -> i64 {
        self.anchor
            .lock(|cell| cell.get())
            .map(|anchor| anchor.unix + anchor.at.elapsed().as_secs() as i64)
            .unwrap_or(0)
    }
}
