//! HTTP client for the secret server REST API.
//!
//! Logs in with the OAuth2 password grant at `<url>/oauth2/token`, then reads
//! `<url>/api/v1/secrets/<id>` with the bearer token.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{info, warn};

use super::errors::SecretServerError;
use super::traits::SecretServer;
use super::types::{OperatorLogin, Secret, TokenResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`SecretServer`] reached over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpSecretServer {
    url: String,
    domain: String,
}

impl HttpSecretServer {
    pub fn new(url: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            domain: domain.into(),
        }
    }

    /// Base URL with any trailing slash removed.
    fn base_url(&self) -> Result<String, SecretServerError> {
        if self.url.is_empty() {
            return Err(SecretServerError::NotConfigured);
        }
        let parsed = Url::parse(&self.url).map_err(|e| SecretServerError::InvalidUrl {
            url: self.url.clone(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SecretServerError::InvalidUrl {
                url: self.url.clone(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(self.url.trim_end_matches('/').to_string())
    }

    fn access_token(
        &self,
        client: &Client,
        base: &str,
        login: &OperatorLogin,
    ) -> Result<String, SecretServerError> {
        let mut form = vec![
            ("grant_type", "password"),
            ("username", login.username.as_str()),
            ("password", login.password.as_str()),
        ];
        if !self.domain.is_empty() {
            form.push(("domain", self.domain.as_str()));
        }

        let response = client
            .post(format!("{base}/oauth2/token"))
            .form(&form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(
                event = "core.secret_server.login_failed",
                status = status.as_u16(),
                username = %login.username
            );
            return Err(SecretServerError::AuthFailed {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json()?;
        Ok(token.access_token)
    }
}

impl SecretServer for HttpSecretServer {
    fn secret(&self, login: &OperatorLogin, secret_id: i64) -> Result<Secret, SecretServerError> {
        let base = self.base_url()?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        info!(
            event = "core.secret_server.fetch_started",
            secret_id = secret_id,
            url = %base
        );

        let token = self.access_token(&client, &base, login)?;

        let response = client
            .get(format!("{base}/api/v1/secrets/{secret_id}"))
            .bearer_auth(token)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(
                event = "core.secret_server.fetch_failed",
                secret_id = secret_id,
                status = status.as_u16()
            );
            return Err(SecretServerError::SecretRequestFailed {
                secret_id,
                status: status.as_u16(),
                body,
            });
        }

        let secret: Secret = response.json()?;
        info!(
            event = "core.secret_server.fetch_completed",
            secret_id = secret_id,
            fields = secret.items.len()
        );
        Ok(secret)
    }
}
