//! Wall clock trait

/// Synchronized wall clock
pub trait Clock {
    /// Current time in unix seconds
    fn now(&self) -> i64;
}
