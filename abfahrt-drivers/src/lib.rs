//! Driver implementations
//!
//! Concrete implementations of the traits defined in abfahrt-core:
//!
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - MVG departure feed JSON format
//! - HTTP/1.0 request and response framing for the feed transport
//! - SNTP request and reply codec for the wall clock
//!
//! JSON decoding needs a global allocator; the firmware provides one.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod feed;
pub mod http;
pub mod lcd;
pub mod sntp;
