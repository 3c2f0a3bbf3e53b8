//! Network link state

use embassy_net::Stack;

use abfahrt_core::traits::Link;

/// Link backed by the embassy-net stack
///
/// Up once DHCP has assigned an address; drops back when the WiFi
/// connection is lost and the lease is released.
#[derive(Clone, Copy)]
pub struct NetLink {
    stack: Stack<'static>,
}

impl NetLink {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl Link for NetLink {
    fn is_up(&self) -> bool {
        self.stack.is_config_up()
    }
}
