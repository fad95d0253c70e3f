use crate::config::fields::{FieldSpec, FieldValue, Record, unhandled_field};
use crate::errors::ConfigError;
use crate::hosts::errors::HostError;
use crate::hosts::traits::Host;
use crate::hosts::types::Socket;

/// A host defined entirely by its global fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicHost;

impl Record for BasicHost {
    fn kind(&self) -> &'static str {
        "basic"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        &[]
    }

    fn set_field(&mut self, name: &str, _value: FieldValue) -> Result<(), ConfigError> {
        Err(unhandled_field(self.kind(), name))
    }
}

impl Host for BasicHost {
    fn socket(&self) -> Result<Socket, HostError> {
        Ok(Socket::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fields::load_fields;

    #[test]
    fn test_basic_socket_is_empty() {
        assert_eq!(BasicHost.socket().unwrap(), Socket::default());
        assert!(BasicHost.as_cred().is_none());
    }

    #[test]
    fn test_basic_accepts_only_globals() {
        let table: toml::Table = toml::from_str(
            r#"
address = "10.0.0.1"
port = "3390"
"#,
        )
        .unwrap();
        let mut host = BasicHost;
        assert!(load_fields(&mut host, &table).is_ok());

        let table: toml::Table = toml::from_str("region = \"eu-west-1\"").unwrap();
        let err = load_fields(&mut host, &table).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { ref key, .. } if key == "region"));
    }
}
