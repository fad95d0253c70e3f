use crate::aws::AwsError;
use crate::errors::RunrdpError;
use crate::hosts::HostError;
use crate::secret_server::SecretServerError;

#[derive(Debug, thiserror::Error)]
pub enum CredError {
    #[error("Retrieving {part} '{secret_id}': {source}")]
    SecretLookup {
        part: &'static str,
        secret_id: String,
        #[source]
        source: AwsError,
    },

    #[error("Getting administrator password: {source}")]
    PasswordData {
        #[source]
        source: AwsError,
    },

    #[error("Fetching instance details: {source}")]
    InstanceLookup {
        #[from]
        source: HostError,
    },

    #[error("Instance {instance_id} has no key pair")]
    MissingKeyPair { instance_id: String },

    #[error("Private key {key_name} not found in directory {dir}")]
    PrivateKeyNotFound { key_name: String, dir: String },

    #[error("Reading SSH key directory '{dir}': {source}")]
    KeyDirectory {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Password data for instance {instance_id} is not available yet")]
    EmptyPasswordData { instance_id: String },

    #[error("Getting secret '{secret_id}' from secret server: {source}")]
    SecretServer {
        secret_id: i64,
        #[source]
        source: SecretServerError,
    },

    #[error("Secret '{secret}' with template ID {template_id} has no field '{field}'")]
    MissingSecretField {
        secret: String,
        template_id: i64,
        field: &'static str,
    },

    #[error("Reading login input: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },
}

impl RunrdpError for CredError {
    fn error_code(&self) -> &'static str {
        match self {
            CredError::SecretLookup { .. } => "SECRET_LOOKUP_FAILED",
            CredError::PasswordData { .. } => "PASSWORD_DATA_FAILED",
            CredError::InstanceLookup { source } => source.error_code(),
            CredError::MissingKeyPair { .. } => "MISSING_KEY_PAIR",
            CredError::PrivateKeyNotFound { .. } => "PRIVATE_KEY_NOT_FOUND",
            CredError::KeyDirectory { .. } => "KEY_DIRECTORY_ERROR",
            CredError::EmptyPasswordData { .. } => "EMPTY_PASSWORD_DATA",
            CredError::SecretServer { source, .. } => source.error_code(),
            CredError::MissingSecretField { .. } => "MISSING_SECRET_FIELD",
            CredError::Prompt { .. } => "PROMPT_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            CredError::SecretLookup { source, .. } | CredError::PasswordData { source } => {
                source.is_user_error()
            }
            CredError::InstanceLookup { source } => source.is_user_error(),
            CredError::SecretServer { source, .. } => source.is_user_error(),
            CredError::KeyDirectory { .. } | CredError::Prompt { .. } => false,
            _ => true,
        }
    }
}
