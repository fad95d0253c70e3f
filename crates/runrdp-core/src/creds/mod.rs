pub mod errors;
pub mod secrets_manager;
pub mod thycotic;
pub mod traits;
pub mod types;

pub use errors::CredError;
pub use secrets_manager::SecretsManagerCred;
pub use thycotic::ThycoticCred;
pub use traits::{Cred, CredRecord};
pub use types::Credentials;
