use std::path::Path;

use super::errors::AwsError;
use super::types::{AwsTarget, InstanceDescriptor, InstanceQuery};

/// The AWS calls the host and credential kinds depend on.
pub trait AwsApi: Send + Sync {
    /// Every instance matching the query, across all reservations.
    fn describe_instances(
        &self,
        target: &AwsTarget,
        query: &InstanceQuery,
    ) -> Result<Vec<InstanceDescriptor>, AwsError>;

    /// The instance's initial administrator password, decrypted with the
    /// private key at `key_path`. Empty while the instance is still preparing it.
    fn get_password_data(
        &self,
        target: &AwsTarget,
        instance_id: &str,
        key_path: &Path,
    ) -> Result<String, AwsError>;

    /// The string value of a Secrets Manager secret.
    fn get_secret_value(&self, target: &AwsTarget, secret_id: &str) -> Result<String, AwsError>;
}
