//! Embassy async tasks
//!
//! The network runner and WiFi supervisor move packets; the display task
//! owns the scheduler and the LCD; the SNTP task keeps the clock.

pub mod display;
pub mod sntp;
pub mod wifi;

pub use display::display_task;
pub use sntp::sntp_task;
pub use wifi::{connection_task, net_task};
