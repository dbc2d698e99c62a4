use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Where the mock server listens. Port 0 lets the OS pick a free port.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MockServerConfiguration {
    address: SocketAddr,
}

impl MockServerConfiguration {
    pub fn new() -> Self {
        Self {
            address: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
        }
    }

    pub fn with_port(port: u16) -> Self {
        let mut configuration = Self::new();
        configuration.set_port(port);
        configuration
    }

    pub fn set_address(&mut self, address: SocketAddr) {
        self.address = address;
    }

    pub fn set_port(&mut self, port: u16) {
        self.address.set_port(port);
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }
}

impl Default for MockServerConfiguration {
    fn default() -> Self {
        Self::new()
    }
}
