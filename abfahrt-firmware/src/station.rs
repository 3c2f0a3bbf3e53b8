//! Deployment settings
//!
//! Generated by build.rs from station.toml.

include!(concat!(env!("OUT_DIR"), "/station.rs"));
