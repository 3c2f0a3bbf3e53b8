//! Configuration constants
//!
//! Timing and layout are fixed at build time. Only the feed query (which
//! stop, how many results) varies per deployment and is filled in by the
//! firmware from its station config.

pub mod layout;
pub mod query;
pub mod timing;

pub use layout::*;
pub use query::*;
pub use timing::*;
