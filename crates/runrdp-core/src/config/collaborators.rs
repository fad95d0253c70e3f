use std::sync::Arc;

use crate::aws::AwsApi;
use crate::secret_server::{OperatorPrompt, SecretServer};

/// External services handed to the built-in record kinds.
#[derive(Clone)]
pub struct Collaborators {
    pub aws: Arc<dyn AwsApi>,
    pub secret_server: Arc<dyn SecretServer>,
    pub prompt: Arc<dyn OperatorPrompt>,
}
