use crate::aws::AwsError;
use crate::errors::RunrdpError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Getting instances: {source}")]
    Aws {
        #[from]
        source: AwsError,
    },

    #[error("No id, includetags or filterjson field in config, must provide one")]
    NoInstanceSelector,

    #[error("Invalid instance selector: {message}")]
    InvalidSelector { message: String },

    #[error("No instances found")]
    NoInstancesFound,

    #[error("No instance was chosen from the {count} matching instances")]
    NoInstanceChosen { count: usize },

    #[error("Reading instance choice: {source}")]
    ChoiceFailed {
        #[source]
        source: std::io::Error,
    },

    #[error("Instance {id} state is '{state}', not 'running'")]
    InstanceNotRunning { id: String, state: String },

    #[error("Instance {id} does not have a {kind} ip address")]
    MissingAddress { id: String, kind: &'static str },
}

impl RunrdpError for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            HostError::Aws { source } => source.error_code(),
            HostError::NoInstanceSelector => "NO_INSTANCE_SELECTOR",
            HostError::InvalidSelector { .. } => "INVALID_INSTANCE_SELECTOR",
            HostError::NoInstancesFound => "NO_INSTANCES_FOUND",
            HostError::NoInstanceChosen { .. } => "NO_INSTANCE_CHOSEN",
            HostError::ChoiceFailed { .. } => "INSTANCE_CHOICE_FAILED",
            HostError::InstanceNotRunning { .. } => "INSTANCE_NOT_RUNNING",
            HostError::MissingAddress { .. } => "MISSING_ADDRESS",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            HostError::Aws { source } => source.is_user_error(),
            HostError::ChoiceFailed { .. } => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_instance_chosen() {
        let error = HostError::NoInstanceChosen { count: 2 };
        assert_eq!(
            error.to_string(),
            "No instance was chosen from the 2 matching instances"
        );
        assert_eq!(error.error_code(), "NO_INSTANCE_CHOSEN");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_aws_error_code_passes_through() {
        let error = HostError::from(AwsError::ProgramNotFound {
            program: "aws".to_string(),
        });
        assert_eq!(error.error_code(), "AWS_PROGRAM_NOT_FOUND");
        assert!(error.is_user_error());
    }
}
