use super::errors::SecretServerError;
use super::types::{OperatorLogin, Secret};

/// A Thycotic-style secret server.
pub trait SecretServer: Send + Sync {
    /// Log in as `login` and fetch the secret with the given id.
    fn secret(&self, login: &OperatorLogin, secret_id: i64) -> Result<Secret, SecretServerError>;
}

/// Questions put to the operator at the terminal.
pub trait OperatorPrompt: Send + Sync {
    /// The operator's own login for `service`.
    fn login(&self, service: &str) -> std::io::Result<OperatorLogin>;

    /// Show `options` numbered from 1 under `title` and read the operator's pick.
    ///
    /// Returns the zero-based index of the chosen option, or `None` when the
    /// answer is not one of the listed numbers.
    fn choose(&self, title: &str, options: &[String]) -> std::io::Result<Option<usize>>;
}
