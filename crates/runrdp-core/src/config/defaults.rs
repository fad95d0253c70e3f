//! Default values and environment overrides for [`RuntimeConfig`].

use std::path::PathBuf;

use tracing::debug;

use crate::config::types::{
    ENV_CONFIG_ROOT, ENV_SSH_DIR, ENV_TAG_SEPARATOR, ENV_THYCOTIC_DOMAIN, ENV_THYCOTIC_URL,
    RuntimeConfig,
};

/// Default separator between a tag key and its value (`Name;web-01`).
pub const DEFAULT_TAG_SEPARATOR: &str = ";";

/// Default program used to reach the AWS API.
pub const DEFAULT_AWS_CLI: &str = "aws";

fn home_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home,
        None => {
            eprintln!(
                "Warning: Could not find home directory. Set HOME environment variable. \
                Using fallback directory."
            );
            std::env::temp_dir()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let home = home_dir();

        Self {
            config_root: home.join(".runrdp"),
            ssh_dir: home.join(".ssh"),
            tag_separator: DEFAULT_TAG_SEPARATOR.to_string(),
            thycotic_url: String::new(),
            thycotic_domain: String::new(),
            aws_cli: DEFAULT_AWS_CLI.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overlaid with the `RUNRDP_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(root) = get(ENV_CONFIG_ROOT) {
            debug!(event = "core.config.override_applied", key = ENV_CONFIG_ROOT);
            self.config_root = PathBuf::from(root);
        }
        if let Some(ssh_dir) = get(ENV_SSH_DIR) {
            debug!(event = "core.config.override_applied", key = ENV_SSH_DIR);
            self.ssh_dir = PathBuf::from(ssh_dir);
        }
        if let Some(separator) = get(ENV_TAG_SEPARATOR) {
            debug!(event = "core.config.override_applied", key = ENV_TAG_SEPARATOR);
            self.tag_separator = separator;
        }
        if let Some(url) = get(ENV_THYCOTIC_URL) {
            debug!(event = "core.config.override_applied", key = ENV_THYCOTIC_URL);
            self.thycotic_url = url;
        }
        if let Some(domain) = get(ENV_THYCOTIC_DOMAIN) {
            debug!(event = "core.config.override_applied", key = ENV_THYCOTIC_DOMAIN);
            self.thycotic_domain = domain;
        }

        self
    }
}
