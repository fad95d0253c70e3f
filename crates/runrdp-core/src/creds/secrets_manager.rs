//! AWS Secrets Manager credential kind (`[cred.awssm.<name>]`).

use std::sync::Arc;

use tracing::debug;

use crate::aws::{AwsApi, AwsTarget};
use crate::config::fields::{FieldKind, FieldSpec, FieldValue, Record, unhandled_field};
use crate::creds::errors::CredError;
use crate::creds::traits::Cred;
use crate::creds::types::Credentials;
use crate::errors::ConfigError;

const SECRETS_MANAGER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("usernameid", FieldKind::String),
    FieldSpec::new("passwordid", FieldKind::String),
    FieldSpec::new("profile", FieldKind::String),
    FieldSpec::new("region", FieldKind::String),
];

/// Username and password stored as two separate string secrets.
pub struct SecretsManagerCred {
    pub username_id: String,
    pub password_id: String,
    pub profile: String,
    pub region: String,
    aws: Arc<dyn AwsApi>,
}

impl std::fmt::Debug for SecretsManagerCred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsManagerCred")
            .field("username_id", &self.username_id)
            .field("password_id", &self.password_id)
            .field("profile", &self.profile)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl SecretsManagerCred {
    pub fn new(aws: Arc<dyn AwsApi>) -> Self {
        Self {
            username_id: String::new(),
            password_id: String::new(),
            profile: String::new(),
            region: String::new(),
            aws,
        }
    }

    fn lookup(
        &self,
        target: &AwsTarget,
        part: &'static str,
        secret_id: &str,
    ) -> Result<String, CredError> {
        if secret_id.is_empty() {
            return Ok(String::new());
        }
        debug!(event = "core.awssm.lookup_started", part = part, secret_id = secret_id);
        self.aws
            .get_secret_value(target, secret_id)
            .map_err(|e| CredError::SecretLookup {
                part,
                secret_id: secret_id.to_string(),
                source: e,
            })
    }
}

impl Record for SecretsManagerCred {
    fn kind(&self) -> &'static str {
        "awssm"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        SECRETS_MANAGER_FIELDS
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("usernameid", FieldValue::String(v)) => self.username_id = v,
            ("passwordid", FieldValue::String(v)) => self.password_id = v,
            ("profile", FieldValue::String(v)) => self.profile = v,
            ("region", FieldValue::String(v)) => self.region = v,
            _ => return Err(unhandled_field(self.kind(), name)),
        }
        Ok(())
    }
}

impl Cred for SecretsManagerCred {
    fn retrieve(&self) -> Result<Credentials, CredError> {
        let target = AwsTarget::new(&self.profile, &self.region);
        let username = self.lookup(&target, "username", &self.username_id)?;
        let password = self.lookup(&target, "password", &self.password_id)?;
        Ok(Credentials { username, password })
    }
}
