use std::path::Path;

use tracing::{error, info};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

/// Record the size of a freshly loaded configuration.
pub fn log_config_loaded(config_root: &Path, config: &crate::config::Configuration) {
    info!(
        event = "core.config.load_completed",
        config_root = %config_root.display(),
        hosts = config.host_count(),
        creds = config.cred_count(),
        tunnels = config.tunnel_count(),
        settings = config.settings_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_events() {
        log_app_startup();
        log_config_loaded(Path::new("/tmp/runrdp"), &crate::config::Configuration::new());

        let test_error = std::io::Error::other("test");
        log_app_error(&test_error);
    }
}
