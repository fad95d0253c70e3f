pub mod client;
pub mod errors;
pub mod prompt;
pub mod traits;
pub mod types;

pub use client::HttpSecretServer;
pub use errors::SecretServerError;
pub use prompt::{TerminalPrompt, parse_choice};
pub use traits::{OperatorPrompt, SecretServer};
pub use types::{OperatorLogin, Secret, SecretItem};
