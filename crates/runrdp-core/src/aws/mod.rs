pub mod cli;
pub mod errors;
pub mod traits;
pub mod types;

pub use cli::AwsCli;
pub use errors::AwsError;
pub use traits::AwsApi;
pub use types::{AwsTarget, InstanceDescriptor, InstanceFilter, InstanceQuery};
