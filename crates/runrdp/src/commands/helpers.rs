//! Shared helpers for command handlers.

use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, warn};

use runrdp_core::config::{Configuration, Registries, RuntimeConfig};
use runrdp_core::events;

/// Number of suggestions printed for an unknown host name.
const MAX_SUGGESTIONS: usize = 3;

/// Runtime settings from defaults, `RUNRDP_*` variables and global flags.
pub fn runtime_config(matches: &ArgMatches) -> RuntimeConfig {
    let mut runtime = RuntimeConfig::from_env();
    let flag = |name: &str| {
        matches
            .get_one::<String>(name)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    };

    if let Some(root) = flag("config-root") {
        runtime.config_root = PathBuf::from(root);
    }
    if let Some(ssh_dir) = flag("ssh-directory") {
        runtime.ssh_dir = PathBuf::from(ssh_dir);
    }
    if let Some(separator) = flag("tag-separator") {
        runtime.tag_separator = separator;
    }
    if let Some(url) = flag("thycotic-url") {
        runtime.thycotic_url = url;
    }
    if let Some(domain) = flag("thycotic-domain") {
        runtime.thycotic_domain = domain;
    }

    runtime
}

/// Load every configuration document under the runtime's config root.
pub fn load_configuration(
    matches: &ArgMatches,
) -> Result<Configuration, Box<dyn std::error::Error>> {
    let runtime = runtime_config(matches);

    let loaded = Registries::from_runtime(&runtime)
        .and_then(|registries| Configuration::load(&runtime.config_root, &registries));

    match loaded {
        Ok(config) => {
            if config.host_count() == 0 {
                warn!(
                    event = "cli.config.no_hosts",
                    config_root = %runtime.config_root.display()
                );
            }
            Ok(config)
        }
        Err(e) => {
            eprintln!(
                "❌ Failed to load configuration: {}\n\
                 Tip: Check the TOML files in {}",
                e,
                runtime.config_root.display()
            );
            error!(event = "cli.config.load_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Configured host name for `name`, or an error listing close matches.
pub fn resolve_host_name(
    config: &Configuration,
    name: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(found) = config.lookup_host_name(name) {
        return Ok(found.to_string());
    }

    let suggestions: Vec<String> = config
        .find_by_pattern(name)
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .collect();

    eprintln!("❌ Host '{}' not found", name);
    if !suggestions.is_empty() {
        eprintln!("   Did you mean: {}?", suggestions.join(", "));
    }
    warn!(
        event = "cli.host_not_found",
        host = name,
        suggestions = suggestions.len()
    );

    Err(format!("Host '{}' does not exist in config", name).into())
}
