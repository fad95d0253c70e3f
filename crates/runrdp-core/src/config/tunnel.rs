//! SSH tunnel records (`[tunnel.<name>]`).

use serde::Serialize;

use crate::config::fields::{FieldKind, FieldSpec, FieldValue, Record, unhandled_field};
use crate::errors::ConfigError;

const TUNNEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("host", FieldKind::String),
    FieldSpec::new("localport", FieldKind::String),
    FieldSpec::new("key", FieldKind::String),
    FieldSpec::new("user", FieldKind::String),
];

/// Details for opening an SSH port forward through a forwarding server.
///
/// Equivalent to `ssh -i <key> -N -L <localport>:<target>:<port> <user>@<host>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tunnel {
    /// Host key of the forwarding server.
    pub host: String,
    pub local_port: String,
    /// Path to the private key file.
    pub key: String,
    pub user: String,
}

impl Record for Tunnel {
    fn kind(&self) -> &'static str {
        "tunnel"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        TUNNEL_FIELDS
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("host", FieldValue::String(v)) => self.host = v,
            ("localport", FieldValue::String(v)) => self.local_port = v,
            ("key", FieldValue::String(v)) => self.key = v,
            ("user", FieldValue::String(v)) => self.user = v,
            _ => return Err(unhandled_field(self.kind(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        if self.local_port.is_empty() {
            return Err("localport is required".to_string());
        }
        if self.local_port.parse::<u16>().is_err() {
            return Err(format!(
                "localport '{}' is not a valid port number",
                self.local_port
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fields::load_fields;

    #[test]
    fn test_tunnel_loads_all_fields() {
        let table: toml::Table = toml::from_str(
            r#"
host = "bastion"
localport = "3390"
key = "/home/me/.ssh/key"
user = "ubuntu"
"#,
        )
        .unwrap();

        let mut tunnel = Tunnel::default();
        load_fields(&mut tunnel, &table).unwrap();

        assert_eq!(
            tunnel,
            Tunnel {
                host: "bastion".to_string(),
                local_port: "3390".to_string(),
                key: "/home/me/.ssh/key".to_string(),
                user: "ubuntu".to_string(),
            }
        );
        assert!(tunnel.validate().is_ok());
    }

    #[test]
    fn test_tunnel_rejects_bad_local_port() {
        let tunnel = Tunnel {
            local_port: "33a".to_string(),
            ..Default::default()
        };
        assert!(tunnel.validate().unwrap_err().contains("33a"));
    }

    #[test]
    fn test_tunnel_requires_local_port() {
        let tunnel = Tunnel {
            host: "bastion".to_string(),
            ..Default::default()
        };
        assert_eq!(tunnel.validate().unwrap_err(), "localport is required");
    }
}
