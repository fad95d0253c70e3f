//! Thycotic Secret Server credential kind (`[cred.thycotic.<name>]`).

use std::sync::Arc;

use tracing::info;

use crate::config::fields::{FieldKind, FieldSpec, FieldValue, Record, unhandled_field};
use crate::creds::errors::CredError;
use crate::creds::traits::Cred;
use crate::creds::types::Credentials;
use crate::errors::ConfigError;
use crate::secret_server::{OperatorPrompt, Secret, SecretServer};

/// Name shown when asking the operator for their own login.
const SERVICE_NAME: &str = "Thycotic";

const THYCOTIC_FIELDS: &[FieldSpec] = &[FieldSpec::new("secretid", FieldKind::Integer)];

/// Username and password read from the `Username` and `Password` fields of a
/// secret. The operator logs in with their own account on every retrieval.
pub struct ThycoticCred {
    pub secret_id: i64,
    server: Arc<dyn SecretServer>,
    prompt: Arc<dyn OperatorPrompt>,
}

impl std::fmt::Debug for ThycoticCred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThycoticCred")
            .field("secret_id", &self.secret_id)
            .finish_non_exhaustive()
    }
}

impl ThycoticCred {
    pub fn new(server: Arc<dyn SecretServer>, prompt: Arc<dyn OperatorPrompt>) -> Self {
        Self {
            secret_id: 0,
            server,
            prompt,
        }
    }
}

fn secret_field(secret: &Secret, field: &'static str) -> Result<String, CredError> {
    secret
        .field(field)
        .map(str::to_string)
        .ok_or_else(|| CredError::MissingSecretField {
            secret: secret.name.clone(),
            template_id: secret.secret_template_id,
            field,
        })
}

impl Record for ThycoticCred {
    fn kind(&self) -> &'static str {
        "thycotic"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        THYCOTIC_FIELDS
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("secretid", FieldValue::Integer(v)) => self.secret_id = v,
            _ => return Err(unhandled_field(self.kind(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        if self.secret_id == 0 {
            return Err("invalid thycotic secret id: 0".to_string());
        }
        Ok(())
    }
}

impl Cred for ThycoticCred {
    fn retrieve(&self) -> Result<Credentials, CredError> {
        let login = self
            .prompt
            .login(SERVICE_NAME)
            .map_err(|e| CredError::Prompt { source: e })?;

        let secret = self
            .server
            .secret(&login, self.secret_id)
            .map_err(|e| CredError::SecretServer {
                secret_id: self.secret_id,
                source: e,
            })?;

        info!(
            event = "core.thycotic.secret_fetched",
            secret_id = self.secret_id,
            name = %secret.name
        );

        Ok(Credentials {
            username: secret_field(&secret, "Username")?,
            password: secret_field(&secret, "Password")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fields::load_fields;
    use crate::secret_server::{OperatorLogin, SecretItem, SecretServerError};
    use std::sync::Mutex;

    struct FixedPrompt;

    impl OperatorPrompt for FixedPrompt {
        fn login(&self, _service: &str) -> std::io::Result<OperatorLogin> {
            Ok(OperatorLogin {
                username: "jdoe".to_string(),
                password: "operator-pw".to_string(),
            })
        }

        fn choose(&self, _title: &str, _options: &[String]) -> std::io::Result<Option<usize>> {
            Ok(None)
        }
    }

    struct FakeServer {
        secret: Secret,
        logins: Mutex<Vec<String>>,
    }

    impl SecretServer for FakeServer {
        fn secret(
            &self,
            login: &OperatorLogin,
            secret_id: i64,
        ) -> Result<Secret, SecretServerError> {
            self.logins.lock().unwrap().push(login.username.clone());
            if secret_id != self.secret.id {
                return Err(SecretServerError::SecretRequestFailed {
                    secret_id,
                    status: 404,
                    body: "not found".to_string(),
                });
            }
            Ok(self.secret.clone())
        }
    }

    fn item(name: &str, value: &str) -> SecretItem {
        SecretItem {
            field_name: name.to_string(),
            slug: name.to_lowercase(),
            item_value: value.to_string(),
        }
    }

    fn server(items: Vec<SecretItem>) -> Arc<FakeServer> {
        Arc::new(FakeServer {
            secret: Secret {
                id: 1234,
                name: "web admin".to_string(),
                secret_template_id: 6003,
                items,
            },
            logins: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_zero_secret_id_is_invalid() {
        let cred = ThycoticCred::new(server(vec![]), Arc::new(FixedPrompt));
        assert_eq!(
            cred.validate().unwrap_err(),
            "invalid thycotic secret id: 0"
        );
    }

    #[test]
    fn test_secretid_must_be_integer() {
        let mut cred = ThycoticCred::new(server(vec![]), Arc::new(FixedPrompt));
        let table: toml::Table = toml::from_str("secretid = \"1234\"").unwrap();
        assert!(matches!(
            load_fields(&mut cred, &table).unwrap_err(),
            ConfigError::FieldTypeMismatch { .. }
        ));
    }

    #[test]
    fn test_retrieve_logs_in_as_operator() {
        let server = server(vec![item("Username", "svc_web"), item("Password", "pw")]);
        let mut cred = ThycoticCred::new(server.clone(), Arc::new(FixedPrompt));
        cred.secret_id = 1234;

        assert_eq!(cred.retrieve().unwrap(), Credentials::new("svc_web", "pw"));
        assert_eq!(*server.logins.lock().unwrap(), vec!["jdoe"]);
    }

    #[test]
    fn test_missing_password_field() {
        let mut cred = ThycoticCred::new(
            server(vec![item("Username", "svc_web")]),
            Arc::new(FixedPrompt),
        );
        cred.secret_id = 1234;

        match cred.retrieve().unwrap_err() {
            CredError::MissingSecretField {
                secret,
                template_id,
                field,
            } => {
                assert_eq!(secret, "web admin");
                assert_eq!(template_id, 6003);
                assert_eq!(field, "Password");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_server_error_is_wrapped() {
        let mut cred = ThycoticCred::new(server(vec![]), Arc::new(FixedPrompt));
        cred.secret_id = 99;
        let err = cred.retrieve().unwrap_err();
        assert!(err.to_string().starts_with("Getting secret '99'"));
    }
}
