//! Host type definitions.

use serde::Serialize;

/// An address and port pair. Either part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Socket {
    pub address: String,
    pub port: String,
}

impl Socket {
    pub fn new(address: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: port.into(),
        }
    }
}
