//! Network link trait

/// Network connectivity
pub trait Link {
    /// Check if the station is associated and has an address
    fn is_up(&self) -> bool;
}
