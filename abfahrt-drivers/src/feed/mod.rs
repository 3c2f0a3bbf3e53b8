//! Departure feed formats

pub mod mvg;

pub use mvg::MvgFormat;
