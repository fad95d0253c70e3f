use std::error::Error;

/// Base trait for all application errors
pub trait RunrdpError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type RunrdpResult<T> = Result<T, Box<dyn RunrdpError>>;

/// Load-time configuration errors.
///
/// Every variant is fatal: a configuration that produced one of these must not
/// be used for resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{category} kind '{kind}' not recognized. Supported: {supported}")]
    UnknownKind {
        category: &'static str,
        kind: String,
        supported: String,
    },

    #[error("{category} kind '{kind}' is already registered")]
    DuplicateKind {
        category: &'static str,
        kind: String,
    },

    #[error("Config type '{kind}' declares field '{field}' which is a global host field name")]
    GlobalFieldCollision { kind: String, field: String },

    #[error("Config key '{key}' is invalid for type '{kind}'")]
    InvalidKey { kind: String, key: String },

    #[error("Error loading '{field}' field in {kind} config: expected {expected}")]
    FieldTypeMismatch {
        kind: String,
        field: String,
        expected: String,
    },

    #[error("Global field '{field}' of host '{host}' must be a string")]
    NonStringGlobal { host: String, field: String },

    #[error("Duplicate {category} name '{name}': all {category} names must be unique")]
    DuplicateName {
        category: &'static str,
        name: String,
    },

    #[error("Config validation failed: {name} configuration is invalid: {reason}")]
    InvalidRecord { name: String, reason: String },

    #[error("Malformed entry '{path}' in '{document}': {message}")]
    MalformedDocument {
        document: String,
        path: String,
        message: String,
    },

    #[error("Reading '{path}' fields for {name} in '{document}': {source}")]
    RecordLoadFailed {
        document: String,
        path: String,
        name: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("IO error reading config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// The underlying error with any per-record context stripped.
    pub fn innermost(&self) -> &ConfigError {
        match self {
            ConfigError::RecordLoadFailed { source, .. } => source.innermost(),
            other => other,
        }
    }
}

impl RunrdpError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::UnknownKind { .. } => "UNKNOWN_KIND",
            ConfigError::DuplicateKind { .. } => "DUPLICATE_KIND",
            ConfigError::GlobalFieldCollision { .. } => "GLOBAL_FIELD_COLLISION",
            ConfigError::InvalidKey { .. } => "INVALID_KEY",
            ConfigError::FieldTypeMismatch { .. } => "FIELD_TYPE_MISMATCH",
            ConfigError::NonStringGlobal { .. } => "NON_STRING_GLOBAL",
            ConfigError::DuplicateName { .. } => "DUPLICATE_NAME",
            ConfigError::InvalidRecord { .. } => "INVALID_RECORD",
            ConfigError::MalformedDocument { .. } => "MALFORMED_DOCUMENT",
            ConfigError::RecordLoadFailed { source, .. } => source.error_code(),
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(
            self,
            ConfigError::DuplicateKind { .. }
                | ConfigError::GlobalFieldCollision { .. }
                | ConfigError::IoError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runrdp_result() {
        let _result: RunrdpResult<i32> = Ok(42);
    }

    #[test]
    fn test_field_type_mismatch_display() {
        let error = ConfigError::FieldTypeMismatch {
            kind: "awsec2".to_string(),
            field: "private".to_string(),
            expected: "value of type bool".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error loading 'private' field in awsec2 config: expected value of type bool"
        );
        assert_eq!(error.error_code(), "FIELD_TYPE_MISMATCH");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_record_load_failed_delegates_code() {
        let error = ConfigError::RecordLoadFailed {
            document: "work.toml".to_string(),
            path: "host.basic".to_string(),
            name: "web".to_string(),
            source: Box::new(ConfigError::InvalidKey {
                kind: "basic".to_string(),
                key: "nope".to_string(),
            }),
        };
        assert_eq!(error.error_code(), "INVALID_KEY");
        assert!(matches!(
            error.innermost(),
            ConfigError::InvalidKey { key, .. } if key == "nope"
        ));
        assert!(error.to_string().contains("'work.toml'"));
    }

    #[test]
    fn test_global_field_collision_is_not_user_error() {
        let error = ConfigError::GlobalFieldCollision {
            kind: "custom".to_string(),
            field: "proxy".to_string(),
        };
        assert_eq!(error.error_code(), "GLOBAL_FIELD_COLLISION");
        assert!(!error.is_user_error());
    }
}
