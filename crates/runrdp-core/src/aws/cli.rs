//! AWS access through the `aws` command-line program.
//!
//! The CLI picks up the user's profiles, SSO sessions and credential helpers
//! from `~/.aws` with no auth code here. Every call asks for JSON output and
//! parses it with `serde_json`.

use std::path::Path;

use tracing::{debug, info, warn};

use super::errors::AwsError;
use super::traits::AwsApi;
use super::types::{
    AwsTarget, DescribeInstancesOutput, InstanceDescriptor, InstanceQuery, PasswordDataOutput,
    SecretValueOutput,
};

/// Reject values that would be read as an option by the AWS CLI.
pub fn validate_aws_arg(value: &str, label: &'static str) -> Result<(), AwsError> {
    if value.starts_with('-') {
        return Err(AwsError::InvalidArgument {
            label,
            value: value.to_string(),
            reason: "must not start with '-'",
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(AwsError::InvalidArgument {
            label,
            value: value.escape_default().to_string(),
            reason: "contains control characters",
        });
    }
    Ok(())
}

/// [`AwsApi`] backed by the `aws` program.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
}

impl AwsCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(
        &self,
        target: &AwsTarget,
        operation: &[&str],
        args: &[String],
    ) -> Result<Vec<u8>, AwsError> {
        let op_name = operation.join(" ");

        if let Err(e) = which::which(&self.program) {
            debug!(
                event = "core.aws.program_lookup_failed",
                program = %self.program,
                error = %e
            );
            return Err(AwsError::ProgramNotFound {
                program: self.program.clone(),
            });
        }

        let mut command = std::process::Command::new(&self.program);
        if !target.profile.is_empty() {
            validate_aws_arg(&target.profile, "profile")?;
            command.args(["--profile", target.profile.as_str()]);
        }
        if !target.region.is_empty() {
            validate_aws_arg(&target.region, "region")?;
            command.args(["--region", target.region.as_str()]);
        }
        command.args(operation).args(args).args(["--output", "json"]);

        info!(
            event = "core.aws.command_started",
            operation = %op_name,
            profile = %target.profile,
            region = %target.region
        );

        let output = command.output().map_err(|e| AwsError::ExecFailed {
            program: self.program.clone(),
            source: e,
        })?;

        if output.status.success() {
            info!(event = "core.aws.command_completed", operation = %op_name);
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                event = "core.aws.command_failed",
                operation = %op_name,
                stderr = %stderr.trim()
            );
            Err(AwsError::CommandFailed {
                operation: op_name,
                message: stderr.trim().to_string(),
            })
        }
    }
}

impl AwsApi for AwsCli {
    fn describe_instances(
        &self,
        target: &AwsTarget,
        query: &InstanceQuery,
    ) -> Result<Vec<InstanceDescriptor>, AwsError> {
        let mut args = Vec::new();
        if let Some(id) = &query.instance_id {
            validate_aws_arg(id, "instance id")?;
            args.push("--instance-ids".to_string());
            args.push(id.clone());
        }
        if !query.filters.is_empty() {
            let filters =
                serde_json::to_string(&query.filters).map_err(|e| AwsError::ParseFailed {
                    operation: "ec2 describe-instances".to_string(),
                    source: e,
                })?;
            args.push("--filters".to_string());
            args.push(filters);
        }

        let stdout = self.run(target, &["ec2", "describe-instances"], &args)?;
        parse_describe_instances(&stdout)
    }

    fn get_password_data(
        &self,
        target: &AwsTarget,
        instance_id: &str,
        key_path: &Path,
    ) -> Result<String, AwsError> {
        validate_aws_arg(instance_id, "instance id")?;
        let args = vec![
            "--instance-id".to_string(),
            instance_id.to_string(),
            format!("--priv-launch-key={}", key_path.display()),
        ];

        let stdout = self.run(target, &["ec2", "get-password-data"], &args)?;
        let output: PasswordDataOutput =
            serde_json::from_slice(&stdout).map_err(|e| AwsError::ParseFailed {
                operation: "ec2 get-password-data".to_string(),
                source: e,
            })?;
        Ok(output.password_data)
    }

    fn get_secret_value(&self, target: &AwsTarget, secret_id: &str) -> Result<String, AwsError> {
        validate_aws_arg(secret_id, "secret id")?;
        let args = vec!["--secret-id".to_string(), secret_id.to_string()];

        let stdout = self.run(target, &["secretsmanager", "get-secret-value"], &args)?;
        parse_secret_value(secret_id, &stdout)
    }
}

fn parse_describe_instances(stdout: &[u8]) -> Result<Vec<InstanceDescriptor>, AwsError> {
    let output: DescribeInstancesOutput =
        serde_json::from_slice(stdout).map_err(|e| AwsError::ParseFailed {
            operation: "ec2 describe-instances".to_string(),
            source: e,
        })?;

    Ok(output
        .reservations
        .into_iter()
        .flat_map(|r| r.instances)
        .map(InstanceDescriptor::from)
        .collect())
}

fn parse_secret_value(secret_id: &str, stdout: &[u8]) -> Result<String, AwsError> {
    let output: SecretValueOutput =
        serde_json::from_slice(stdout).map_err(|e| AwsError::ParseFailed {
            operation: "secretsmanager get-secret-value".to_string(),
            source: e,
        })?;

    output.secret_string.ok_or_else(|| AwsError::BinarySecret {
        secret_id: secret_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_aws_arg() {
        assert!(validate_aws_arg("i-0123456789", "instance id").is_ok());
        assert!(validate_aws_arg("prod/db/password", "secret id").is_ok());
        assert!(validate_aws_arg("--debug", "profile").is_err());
        assert!(validate_aws_arg("eu\nwest", "region").is_err());
    }

    #[test]
    fn test_parse_describe_instances_flattens_reservations() {
        let stdout = br#"{
            "Reservations": [
                {"Instances": [{"InstanceId": "i-1", "State": {"Name": "running"}}]},
                {"Instances": [
                    {"InstanceId": "i-2", "State": {"Name": "stopped"}},
                    {"InstanceId": "i-3", "State": {"Name": "running"}}
                ]}
            ]
        }"#;
        let ids: Vec<String> = parse_describe_instances(stdout)
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["i-1", "i-2", "i-3"]);
    }

    #[test]
    fn test_parse_describe_instances_empty() {
        assert!(
            parse_describe_instances(br#"{"Reservations": []}"#)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_describe_instances_garbage() {
        let err = parse_describe_instances(b"not json").unwrap_err();
        assert!(matches!(err, AwsError::ParseFailed { .. }));
    }

    #[test]
    fn test_parse_secret_value() {
        let value = parse_secret_value("db", br#"{"Name": "db", "SecretString": "hunter2"}"#);
        assert_eq!(value.unwrap(), "hunter2");

        let err = parse_secret_value("db", br#"{"Name": "db", "SecretBinary": "AAEC"}"#)
            .unwrap_err();
        assert!(matches!(err, AwsError::BinarySecret { ref secret_id } if secret_id == "db"));
    }

    #[test]
    fn test_missing_program_is_reported() {
        let cli = AwsCli::new("runrdp-no-such-aws-program");
        let err = cli
            .get_secret_value(&AwsTarget::default(), "db")
            .unwrap_err();
        assert!(matches!(err, AwsError::ProgramNotFound { .. }));
    }
}
