use crate::errors::RunrdpError;

#[derive(Debug, thiserror::Error)]
pub enum AwsError {
    #[error("AWS CLI '{program}' not found on PATH")]
    ProgramNotFound { program: String },

    #[error("Failed to execute '{program}': {source}")]
    ExecFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("AWS {operation} failed: {message}")]
    CommandFailed { operation: String, message: String },

    #[error("Failed to parse AWS {operation} output: {source}")]
    ParseFailed {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Secret '{secret_id}' is binary, not string")]
    BinarySecret { secret_id: String },

    #[error("Invalid AWS argument {label} '{value}': {reason}")]
    InvalidArgument {
        label: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl RunrdpError for AwsError {
    fn error_code(&self) -> &'static str {
        match self {
            AwsError::ProgramNotFound { .. } => "AWS_PROGRAM_NOT_FOUND",
            AwsError::ExecFailed { .. } => "AWS_EXEC_FAILED",
            AwsError::CommandFailed { .. } => "AWS_COMMAND_FAILED",
            AwsError::ParseFailed { .. } => "AWS_PARSE_FAILED",
            AwsError::BinarySecret { .. } => "AWS_BINARY_SECRET",
            AwsError::InvalidArgument { .. } => "AWS_INVALID_ARGUMENT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            AwsError::ProgramNotFound { .. }
                | AwsError::CommandFailed { .. }
                | AwsError::BinarySecret { .. }
                | AwsError::InvalidArgument { .. }
        )
    }
}
