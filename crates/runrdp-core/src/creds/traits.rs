//! Credential trait definition.

use crate::config::fields::Record;
use crate::creds::errors::CredError;
use crate::creds::types::Credentials;

/// Trait defining the interface for credential sources.
///
/// Implemented by every `cred.<kind>` record, and by host kinds that can
/// supply their own credentials.
pub trait Cred: Send + Sync {
    /// Fetch the username and password. Empty strings mean "not provided".
    fn retrieve(&self) -> Result<Credentials, CredError>;
}

/// A credential kind loadable from `[cred.<kind>.<name>]` entries.
pub trait CredRecord: Cred + Record {}

impl<T: Cred + Record> CredRecord for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fields::{FieldSpec, FieldValue};
    use crate::errors::ConfigError;

    struct StaticCred;

    impl Cred for StaticCred {
        fn retrieve(&self) -> Result<Credentials, CredError> {
            Ok(Credentials::new("svc", "hunter2"))
        }
    }

    impl Record for StaticCred {
        fn kind(&self) -> &'static str {
            "static"
        }

        fn fields(&self) -> &'static [FieldSpec] {
            &[]
        }

        fn set_field(&mut self, name: &str, _value: FieldValue) -> Result<(), ConfigError> {
            Err(crate::config::fields::unhandled_field(self.kind(), name))
        }
    }

    #[test]
    fn test_cred_record_is_object_safe() {
        let record: Box<dyn CredRecord> = Box::new(StaticCred);
        assert_eq!(record.kind(), "static");
        assert_eq!(
            record.retrieve().unwrap(),
            Credentials::new("svc", "hunter2")
        );
    }
}
