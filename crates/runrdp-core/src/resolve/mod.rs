//! Resolution of hosts into connection parameters.
//!
//! Queries are methods on [`Configuration`](crate::config::Configuration):
//! `host_socket`, `host_credentials`, `host_tunnel`, `host_settings`,
//! `find_by_pattern` and `resolve_connection`.

pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod fuzzy;

pub use descriptor::{ConnectionDescriptor, DEFAULT_RDP_PORT, Overrides, REDACTED, TunnelPlan};
pub use errors::ResolveError;
pub use fuzzy::{levenshtein, rank_by_pattern};
