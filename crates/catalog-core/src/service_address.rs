//! Identity of the service instance that answered a request.

use std::fmt;

/// Address a service reports in its responses, e.g. `product-1:7001`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceAddress(String);

impl ServiceAddress {
    /// Builds the address from a host name and the port the service listens on.
    #[must_use]
    pub fn new(host: &str, port: u16) -> Self {
        Self(format!("{host}:{port}"))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ServiceAddress> for String {
    fn from(address: ServiceAddress) -> Self {
        address.0
    }
}
