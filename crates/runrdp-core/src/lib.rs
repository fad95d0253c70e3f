//! runrdp-core: Core library for resolving remote desktop targets
//!
//! This library turns host, credential, tunnel and display settings records
//! declared across TOML documents into the parameters needed to open an RDP
//! session. It is used by the `runrdp` CLI.
//!
//! # Main Entry Points
//!
//! - [`config`] - Kind registries, document loading and the loaded configuration
//! - [`resolve`] - Socket, credential, tunnel and settings resolution
//! - [`hosts`] - Host kinds (`basic`, `awsec2`)
//! - [`creds`] - Credential kinds (`awssm`, `thycotic`)

pub mod aws;
pub mod config;
pub mod creds;
pub mod errors;
pub mod events;
pub mod hosts;
pub mod logging;
pub mod resolve;
pub mod secret_server;

// Re-export commonly used types at crate root for convenience
pub use config::{Configuration, Registries, RuntimeConfig, Settings, Tunnel};
pub use creds::{Cred, Credentials};
pub use errors::{ConfigError, RunrdpError};
pub use hosts::{Host, Socket};
pub use resolve::{ConnectionDescriptor, Overrides, ResolveError, TunnelPlan};

// Re-export logging initialization
pub use logging::init_logging;
