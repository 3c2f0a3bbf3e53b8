//! Display task
//!
//! Runs the departure scheduler once per tick interval. The pause is
//! measured from the end of each tick, so a slow fetch delays the next
//! frame instead of causing a burst of catch-up ticks.

use embassy_time::{Duration, Timer};
use log::{debug, info, warn};

use abfahrt_core::config::TICK_INTERVAL_MS;
use abfahrt_core::scheduler::{FetchOutcome, Scheduler, TickReport};
use abfahrt_drivers::feed::MvgFormat;

use crate::clock::CLOCK;
use crate::fetch::HttpFeedSource;
use crate::link::NetLink;
use crate::Lcd;

/// Display task - fetches the feed and redraws both rows
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, link: NetLink, source: HttpFeedSource) {
    info!("Display task started");

    let mut scheduler = Scheduler::new(source, MvgFormat::new());

    loop {
        match scheduler.tick(&link, &CLOCK, &mut lcd).await {
            TickReport::Offline => debug!("Link down, display held"),
            TickReport::Refreshed { scroll } => debug!("Refreshed at scroll {}", scroll),
            TickReport::Fetched(FetchOutcome::Updated { departures }) => {
                info!("Feed updated: {} departures", departures)
            }
            TickReport::Fetched(FetchOutcome::Kept(e)) => {
                warn!("Feed update failed, keeping previous: {:?}", e)
            }
        }

        Timer::after(Duration::from_millis(TICK_INTERVAL_MS)).await;
    }
}
