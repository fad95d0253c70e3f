use crate::errors::RunrdpError;

#[derive(Debug, thiserror::Error)]
pub enum SecretServerError {
    #[error("Secret server URL is not set (use --thycotic-url or RUNRDP_THYCOTIC_URL)")]
    NotConfigured,

    #[error("Invalid secret server URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Secret server request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Secret server login failed ({status}): {body}")]
    AuthFailed { status: u16, body: String },

    #[error("Getting secret '{secret_id}' failed ({status}): {body}")]
    SecretRequestFailed {
        secret_id: i64,
        status: u16,
        body: String,
    },
}

impl RunrdpError for SecretServerError {
    fn error_code(&self) -> &'static str {
        match self {
            SecretServerError::NotConfigured => "SECRET_SERVER_NOT_CONFIGURED",
            SecretServerError::InvalidUrl { .. } => "SECRET_SERVER_INVALID_URL",
            SecretServerError::Http { .. } => "SECRET_SERVER_HTTP_ERROR",
            SecretServerError::AuthFailed { .. } => "SECRET_SERVER_AUTH_FAILED",
            SecretServerError::SecretRequestFailed { .. } => "SECRET_SERVER_REQUEST_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, SecretServerError::Http { .. })
    }
}
