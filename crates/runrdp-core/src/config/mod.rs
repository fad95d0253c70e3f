//! # Configuration System
//!
//! Host, credential, tunnel and display settings records declared across any
//! number of TOML documents in the configuration directory (`~/.runrdp` by
//! default).
//!
//! ## Document layout
//!
//! ```toml
//! # ~/.runrdp/work.toml
//! [host.basic.jump]
//! address = "203.0.113.10"
//!
//! [host.awsec2.web]
//! includetags = ["env;prod", "role;web"]
//! private = true
//! proxy = "jump"
//! cred = "webadmin"
//! settings = "wide"
//!
//! [cred.awssm.webadmin]
//! usernameid = "web/admin/user"
//! passwordid = "web/admin/password"
//!
//! [tunnel.bastion]
//! host = "jump"
//! localport = "3390"
//! key = "~/.ssh/bastion.pem"
//! user = "ec2-user"
//!
//! [settings.wide]
//! width = 2560
//! height = 1440
//! ```
//!
//! Host and cred kinds come from a [`Registries`] value; the global host
//! fields (`cred`, `proxy`, `address`, `port`, `username`, `tunnel`,
//! `settings`) may appear on any host.
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use runrdp_core::config::{Configuration, Registries, RuntimeConfig};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let runtime = RuntimeConfig::from_env();
//!     let registries = Registries::from_runtime(&runtime)?;
//!     let config = Configuration::load(&runtime.config_root, &registries)?;
//!     println!("{} hosts", config.host_count());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod collaborators;
pub mod configuration;
pub mod defaults;
pub mod fields;
pub mod globals;
pub mod loading;
pub mod registry;
pub mod settings;
pub mod tunnel;
pub mod types;

// Public API exports
pub use collaborators::Collaborators;
pub use configuration::{Configuration, HostEntry};
pub use fields::{FieldKind, FieldSpec, FieldValue, Record, load_fields};
pub use globals::{GlobalField, HostGlobals};
pub use loading::{Document, load_documents, parse_document};
pub use registry::{KindRegistry, Registries};
pub use settings::{DEFAULT_SETTINGS_NAME, Settings};
pub use tunnel::Tunnel;
pub use types::RuntimeConfig;
