//! Full connection descriptor for a single host.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{Configuration, DEFAULT_SETTINGS_NAME, GlobalField, Record, Settings};

use super::engine::overwrite;
use super::errors::ResolveError;

pub const DEFAULT_RDP_PORT: &str = "3389";
pub const REDACTED: &str = "REMOVED";

/// Operator-supplied values applied after every configured source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub address: Option<String>,
    pub port: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    /// Ignore the host's `proxy` field.
    pub suppress_proxy: bool,
}

/// SSH port-forward needed to reach the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelPlan {
    pub name: String,
    /// Address of the SSH server doing the forwarding.
    pub server: String,
    pub remote_address: String,
    pub remote_port: u16,
    pub local_port: String,
    pub key: String,
    pub user: String,
}

impl TunnelPlan {
    /// Equivalent `ssh` invocation for the forward.
    pub fn ssh_command(&self) -> String {
        format!(
            "ssh -i {} -N -L {}:{}:{} {}@{}",
            self.key, self.local_port, self.remote_address, self.remote_port, self.user, self.server
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub address: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub tunnel: Option<TunnelPlan>,
    pub settings: Settings,
}

impl ConnectionDescriptor {
    /// Copy with a non-empty password replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = REDACTED.to_string();
        }
        copy
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

fn apply(target: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        overwrite(target, value);
    }
}

impl Configuration {
    /// Resolve everything needed to open an RDP session to `name`.
    ///
    /// Operator overrides win over configured values. When the host names a
    /// tunnel, the returned address becomes `localhost` on the tunnel's
    /// local port and the resolved address moves into the tunnel plan.
    pub fn resolve_connection(
        &self,
        name: &str,
        overrides: &Overrides,
    ) -> Result<ConnectionDescriptor, ResolveError> {
        info!(event = "core.resolve.connection_started", host = name);

        let mut socket = self.host_socket(name, overrides.suppress_proxy)?;
        apply(&mut socket.address, overrides.address.as_ref());
        apply(&mut socket.port, overrides.port.as_ref());

        let mut credentials = self.host_credentials(name)?;
        apply(&mut credentials.username, overrides.username.as_ref());
        apply(&mut credentials.password, overrides.password.as_ref());

        if socket.port.is_empty() {
            socket.port = DEFAULT_RDP_PORT.to_string();
        }

        let mut address = socket.address;
        let mut port = socket.port;
        let mut plan = None;

        if let Some(tunnel) = self.host_tunnel(name)? {
            let tunnel_name = self
                .globals(name)
                .map(|g| g.get(GlobalField::Tunnel).to_string())
                .unwrap_or_default();

            let server =
                self.host_socket(&tunnel.host, true)
                    .map_err(|e| ResolveError::TunnelServerFailed {
                        tunnel: tunnel_name.clone(),
                        source: Box::new(e),
                    })?;
            let remote_port = port.parse::<u16>().map_err(|_| ResolveError::InvalidPort {
                label: "remote port",
                value: port.clone(),
            })?;
            if tunnel.local_port.parse::<u16>().is_err() {
                return Err(ResolveError::InvalidPort {
                    label: "tunnel local port",
                    value: tunnel.local_port.clone(),
                });
            }

            let tunnel_plan = TunnelPlan {
                name: tunnel_name,
                server: server.address,
                remote_address: address,
                remote_port,
                local_port: tunnel.local_port.clone(),
                key: tunnel.key.clone(),
                user: tunnel.user.clone(),
            };
            debug!(
                event = "core.resolve.tunnel_planned",
                host = name,
                tunnel = %tunnel_plan.name,
                server = %tunnel_plan.server
            );

            address = "localhost".to_string();
            port = tunnel_plan.local_port.clone();
            plan = Some(tunnel_plan);
        }

        let mut settings = self.connection_settings(name)?;
        if let Some(width) = overrides.width.filter(|w| *w != 0) {
            settings.width = width;
        }
        if let Some(height) = overrides.height.filter(|h| *h != 0) {
            settings.height = height;
        }
        settings
            .validate()
            .map_err(|reason| ResolveError::InvalidSettings {
                host: name.to_string(),
                reason,
            })?;

        let descriptor = ConnectionDescriptor {
            host: name.to_string(),
            address,
            port,
            username: credentials.username,
            password: credentials.password,
            tunnel: plan,
            settings,
        };

        info!(
            event = "core.resolve.connection_completed",
            host = name,
            endpoint = %descriptor.endpoint(),
            tunneled = descriptor.tunnel.is_some()
        );
        Ok(descriptor)
    }

    /// The host's named settings, else the `default` record, else zeros.
    fn connection_settings(&self, name: &str) -> Result<Settings, ResolveError> {
        if let Some(settings) = self.host_settings(name)? {
            if self
                .globals(name)
                .is_some_and(|g| g.get(GlobalField::Settings) == DEFAULT_SETTINGS_NAME)
            {
                warn!(
                    event = "core.resolve.default_settings_named",
                    host = name,
                    "settings named 'default' apply to every host without naming them"
                );
            }
            return Ok(*settings);
        }

        Ok(self
            .settings(DEFAULT_SETTINGS_NAME)
            .copied()
            .unwrap_or_default())
    }
}
