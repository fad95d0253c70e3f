//! Host trait definition.

use crate::config::fields::Record;
use crate::creds::Cred;
use crate::hosts::errors::HostError;
use crate::hosts::types::Socket;

/// Trait defining the interface for host kinds.
///
/// Each host kind (basic, awsec2) implements this trait to supply whatever
/// part of the connection socket it knows. Empty strings mean "not provided".
pub trait Host: Record + Send + Sync {
    /// The address and port this host resolves to.
    ///
    /// May perform a network lookup.
    fn socket(&self) -> Result<Socket, HostError>;

    /// Credentials supplied by the host itself, if this kind can provide them.
    fn as_cred(&self) -> Option<&dyn Cred> {
        None
    }
}
