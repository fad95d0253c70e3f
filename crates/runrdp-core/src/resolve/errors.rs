use crate::creds::CredError;
use crate::errors::RunrdpError;
use crate::hosts::HostError;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Host '{name}' does not exist in config")]
    HostNotFound { name: String },

    #[error("Proxy host '{proxy}' of host '{host}' does not exist")]
    ProxyNotFound { host: String, proxy: String },

    #[error("Retrieving socket for proxy host '{proxy}': {source}")]
    ProxySocketFailed {
        proxy: String,
        #[source]
        source: Box<ResolveError>,
    },

    #[error("Cred config '{cred}' of host '{host}' not found")]
    CredNotFound { host: String, cred: String },

    #[error("Tunnel config '{tunnel}' of host '{host}' not found")]
    TunnelNotFound { host: String, tunnel: String },

    #[error("Settings config '{settings}' of host '{host}' not found")]
    SettingsNotFound { host: String, settings: String },

    #[error("Getting socket for host '{host}': {source}")]
    SocketFailed {
        host: String,
        #[source]
        source: HostError,
    },

    #[error("Retrieving credentials for host '{host}' from {origin}: {source}")]
    RetrieveFailed {
        host: String,
        origin: String,
        #[source]
        source: CredError,
    },

    #[error("Getting ssh tunnel server address for tunnel '{tunnel}': {source}")]
    TunnelServerFailed {
        tunnel: String,
        #[source]
        source: Box<ResolveError>,
    },

    #[error("Invalid {label} '{value}': not a port number")]
    InvalidPort { label: &'static str, value: String },

    #[error("Display settings for host '{host}' are invalid: {reason}")]
    InvalidSettings { host: String, reason: String },
}

impl RunrdpError for ResolveError {
    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::HostNotFound { .. } => "HOST_NOT_FOUND",
            ResolveError::ProxyNotFound { .. } => "PROXY_NOT_FOUND",
            ResolveError::ProxySocketFailed { source, .. } => source.error_code(),
            ResolveError::CredNotFound { .. } => "CRED_NOT_FOUND",
            ResolveError::TunnelNotFound { .. } => "TUNNEL_NOT_FOUND",
            ResolveError::SettingsNotFound { .. } => "SETTINGS_NOT_FOUND",
            ResolveError::SocketFailed { source, .. } => source.error_code(),
            ResolveError::RetrieveFailed { source, .. } => source.error_code(),
            ResolveError::TunnelServerFailed { source, .. } => source.error_code(),
            ResolveError::InvalidPort { .. } => "INVALID_PORT",
            ResolveError::InvalidSettings { .. } => "INVALID_SETTINGS",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ResolveError::ProxySocketFailed { source, .. }
            | ResolveError::TunnelServerFailed { source, .. } => source.is_user_error(),
            ResolveError::SocketFailed { source, .. } => source.is_user_error(),
            ResolveError::RetrieveFailed { source, .. } => source.is_user_error(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_not_found_display() {
        let error = ResolveError::HostNotFound {
            name: "web".to_string(),
        };
        assert_eq!(error.to_string(), "Host 'web' does not exist in config");
        assert_eq!(error.error_code(), "HOST_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_nested_code_passes_through() {
        let error = ResolveError::ProxySocketFailed {
            proxy: "jump".to_string(),
            source: Box::new(ResolveError::SocketFailed {
                host: "jump".to_string(),
                source: HostError::NoInstancesFound,
            }),
        };
        assert_eq!(error.error_code(), "NO_INSTANCES_FOUND");
    }
}
