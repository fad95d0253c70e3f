//! Runtime settings for the resolution engine.
//!
//! These values come from the environment and CLI flags, never from the
//! configuration documents themselves. They are handed explicitly to the
//! record kinds that need them (SSH key lookup, tag parsing, secret server
//! access) instead of being read from process-wide state.

use std::path::PathBuf;

/// Environment variable overriding [`RuntimeConfig::config_root`].
pub const ENV_CONFIG_ROOT: &str = "RUNRDP_CONFIG_ROOT";
/// Environment variable overriding [`RuntimeConfig::ssh_dir`].
pub const ENV_SSH_DIR: &str = "RUNRDP_SSH_DIR";
/// Environment variable overriding [`RuntimeConfig::tag_separator`].
pub const ENV_TAG_SEPARATOR: &str = "RUNRDP_TAG_SEPARATOR";
/// Environment variable overriding [`RuntimeConfig::thycotic_url`].
pub const ENV_THYCOTIC_URL: &str = "RUNRDP_THYCOTIC_URL";
/// Environment variable overriding [`RuntimeConfig::thycotic_domain`].
pub const ENV_THYCOTIC_DOMAIN: &str = "RUNRDP_THYCOTIC_DOMAIN";

/// Runtime configuration for runrdp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding the `*.toml` configuration documents (default: ~/.runrdp)
    pub config_root: PathBuf,
    /// Directory holding `<keyname>.pem` files for EC2 password decryption (default: ~/.ssh)
    pub ssh_dir: PathBuf,
    /// Separator between key and value in `includetags`/`excludetags` entries
    pub tag_separator: String,
    /// Base URL of the Thycotic Secret Server
    pub thycotic_url: String,
    /// Active Directory domain used when logging in to the Thycotic Secret Server
    pub thycotic_domain: String,
    /// Program used to reach the AWS API
    pub aws_cli: String,
}
