//! Board-agnostic core logic for the departure board firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or network implementations:
//!
//! - Glyph transcoding from UTF-8 to the HD44780 character ROM
//! - Departure selection with a grace window
//! - Marquee rendering of fixed-width display lines
//! - Fetch/refresh scheduler driving the pipeline once per tick
//! - Traits for the collaborators the scheduler needs (link, clock,
//!   feed source, feed format, display surface)
//! - Compile-time configuration constants
//!
//! # Data flow
//!
//! ```text
//! FeedSource ──► FeedFormat ──► Feed ──► select ──► marquee::render ──► DisplaySurface
//!                                                        │
//!                                                        └── glyph::transcode
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod departure;
pub mod glyph;
pub mod marquee;
pub mod scheduler;
pub mod traits;
