//! Collaborator traits
//!
//! These traits define the interface between the departure pipeline and
//! the platform: network link, wall clock, feed transport and format,
//! and the character display.

pub mod display;
pub mod feed;
pub mod link;
pub mod time;

pub use display::DisplaySurface;
pub use feed::{FeedError, FeedFormat, FeedSource, ParseError, TransportError};
pub use link::Link;
pub use time::Clock;
