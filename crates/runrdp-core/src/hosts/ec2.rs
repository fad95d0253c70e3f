//! AWS EC2 host kind (`[host.awsec2.<name>]`).
//!
//! The instance is looked up on first use and cached for the rest of the
//! process. Selection is by literal instance id, by include tags, by raw
//! describe-instances filter JSON, or any combination of the three; exclude
//! tags are applied to the results. When more than one instance remains the
//! operator picks one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::aws::{AwsApi, AwsTarget, InstanceDescriptor, InstanceFilter, InstanceQuery};
use crate::config::fields::{FieldKind, FieldSpec, FieldValue, Record, unhandled_field};
use crate::creds::{Cred, CredError, Credentials};
use crate::errors::ConfigError;
use crate::hosts::errors::HostError;
use crate::hosts::traits::Host;
use crate::hosts::types::Socket;
use crate::secret_server::OperatorPrompt;

/// Username of the initial administrator account on Windows instances.
pub const ADMINISTRATOR: &str = "Administrator";

const EC2_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("private", FieldKind::Bool),
    FieldSpec::new("getcred", FieldKind::Bool),
    FieldSpec::new("id", FieldKind::String),
    FieldSpec::new("profile", FieldKind::String),
    FieldSpec::new("region", FieldKind::String),
    FieldSpec::new("includetags", FieldKind::List),
    FieldSpec::new("excludetags", FieldKind::List),
    FieldSpec::new("filterjson", FieldKind::String),
];

pub struct Ec2Host {
    /// Connect to the private rather than the public IP address.
    pub private: bool,
    /// Supply the instance's initial administrator password as credentials.
    pub get_cred: bool,
    pub id: String,
    pub profile: String,
    pub region: String,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub filter_json: String,

    aws: Arc<dyn AwsApi>,
    prompt: Arc<dyn OperatorPrompt>,
    ssh_dir: PathBuf,
    tag_separator: String,
    instance: OnceLock<InstanceDescriptor>,
}

impl std::fmt::Debug for Ec2Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ec2Host")
            .field("private", &self.private)
            .field("get_cred", &self.get_cred)
            .field("id", &self.id)
            .field("profile", &self.profile)
            .field("region", &self.region)
            .field("include_tags", &self.include_tags)
            .field("exclude_tags", &self.exclude_tags)
            .field("filter_json", &self.filter_json)
            .field("instance", &self.instance.get())
            .finish_non_exhaustive()
    }
}

impl Ec2Host {
    pub fn new(
        aws: Arc<dyn AwsApi>,
        prompt: Arc<dyn OperatorPrompt>,
        ssh_dir: PathBuf,
        tag_separator: impl Into<String>,
    ) -> Self {
        Self {
            private: false,
            get_cred: false,
            id: String::new(),
            profile: String::new(),
            region: String::new(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            filter_json: String::new(),
            aws,
            prompt,
            ssh_dir,
            tag_separator: tag_separator.into(),
            instance: OnceLock::new(),
        }
    }

    fn target(&self) -> AwsTarget {
        AwsTarget::new(&self.profile, &self.region)
    }

    /// Split a `key<sep>value` tag into its key and optional value.
    fn split_tag<'a>(&self, tag: &'a str) -> Result<(&'a str, Option<&'a str>), String> {
        if self.tag_separator.is_empty() {
            return Err("tag key/value separator is empty".to_string());
        }
        let mut parts = tag.splitn(3, self.tag_separator.as_str());
        let key = parts.next().unwrap_or_default();
        let value = parts.next();
        if parts.next().is_some() {
            return Err(format!(
                "'{}' contains more than one separator ({})",
                tag, self.tag_separator
            ));
        }
        Ok((key, value))
    }

    fn parse_filter_json(&self) -> Result<Vec<InstanceFilter>, String> {
        if self.filter_json.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.filter_json).map_err(|e| format!("invalid filter json: {e}"))
    }

    fn query(&self) -> Result<InstanceQuery, String> {
        let mut query = InstanceQuery::default();

        if !self.id.is_empty() {
            query.instance_id = Some(self.id.clone());
        }

        for tag in &self.include_tags {
            match self.split_tag(tag)? {
                (key, Some(value)) => query.push_filter(format!("tag:{key}"), value.to_string()),
                (key, None) => query.push_filter("tag-key".to_string(), key.to_string()),
            }
        }

        for filter in self.parse_filter_json()? {
            query.filters.push(filter);
        }

        Ok(query)
    }

    fn is_excluded(&self, instance: &InstanceDescriptor) -> bool {
        self.exclude_tags.iter().any(|tag| match self.split_tag(tag) {
            Ok((key, None)) => instance.tags.contains_key(key),
            Ok((key, Some(value))) => instance.tags.get(key).is_some_and(|v| v == value),
            Err(_) => false,
        })
    }

    /// Ask the operator to pick one of several matching instances.
    fn choose_instance(&self, eligible: &[InstanceDescriptor]) -> Result<usize, HostError> {
        let options: Vec<String> = eligible
            .iter()
            .map(|i| format!("{} ({}) - {}", i.name(), i.id, i.state))
            .collect();

        info!(event = "core.ec2.choice_requested", count = eligible.len());

        self.prompt
            .choose("Multiple EC2 instances", &options)
            .map_err(|source| HostError::ChoiceFailed { source })?
            .filter(|index| *index < eligible.len())
            .ok_or(HostError::NoInstanceChosen {
                count: eligible.len(),
            })
    }

    /// The selected instance, fetched on first call and cached afterwards.
    pub fn instance(&self) -> Result<&InstanceDescriptor, HostError> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance);
        }

        let query = self
            .query()
            .map_err(|message| HostError::InvalidSelector { message })?;
        if query.instance_id.is_none() && query.filters.is_empty() {
            return Err(HostError::NoInstanceSelector);
        }

        info!(
            event = "core.ec2.lookup_started",
            id = %self.id,
            filters = query.filters.len()
        );

        let mut eligible: Vec<InstanceDescriptor> = self
            .aws
            .describe_instances(&self.target(), &query)?
            .into_iter()
            .filter(|instance| !self.is_excluded(instance))
            .collect();

        let instance = match eligible.len() {
            0 => return Err(HostError::NoInstancesFound),
            1 => eligible.remove(0),
            count => {
                let index = self.choose_instance(&eligible)?;
                debug!(event = "core.ec2.instance_chosen", count, index);
                eligible.swap_remove(index)
            }
        };

        if !instance.is_running() {
            return Err(HostError::InstanceNotRunning {
                id: instance.id,
                state: instance.state,
            });
        }

        info!(
            event = "core.ec2.lookup_completed",
            instance_id = %instance.id,
            name = %instance.name()
        );

        Ok(self.instance.get_or_init(|| instance))
    }
}

/// Locate `<key_name>` in the SSH directory, ignoring the file extension.
///
/// An exact file name wins, then `<key_name>.pem`, then the first file (by
/// name) whose stem matches.
pub fn find_private_key(ssh_dir: &Path, key_name: &str) -> Result<PathBuf, CredError> {
    for candidate in [key_name.to_string(), format!("{key_name}.pem")] {
        let path = ssh_dir.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }

    let entries = std::fs::read_dir(ssh_dir).map_err(|e| CredError::KeyDirectory {
        dir: ssh_dir.display().to_string(),
        source: e,
    })?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_stem().is_some_and(|stem| stem == key_name))
        .collect();
    matches.sort();

    matches
        .into_iter()
        .next()
        .ok_or_else(|| CredError::PrivateKeyNotFound {
            key_name: key_name.to_string(),
            dir: ssh_dir.display().to_string(),
        })
}

impl Record for Ec2Host {
    fn kind(&self) -> &'static str {
        "awsec2"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        EC2_FIELDS
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("private", FieldValue::Bool(v)) => self.private = v,
            ("getcred", FieldValue::Bool(v)) => self.get_cred = v,
            ("id", FieldValue::String(v)) => self.id = v,
            ("profile", FieldValue::String(v)) => self.profile = v,
            ("region", FieldValue::String(v)) => self.region = v,
            ("includetags", FieldValue::List(v)) => self.include_tags = v,
            ("excludetags", FieldValue::List(v)) => self.exclude_tags = v,
            ("filterjson", FieldValue::String(v)) => self.filter_json = v,
            _ => return Err(unhandled_field(self.kind(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        self.query()?;
        for tag in &self.exclude_tags {
            self.split_tag(tag)?;
        }
        Ok(())
    }
}

impl Host for Ec2Host {
    fn socket(&self) -> Result<Socket, HostError> {
        let instance = self.instance()?;

        let (address, kind) = if self.private {
            (&instance.private_ip, "private")
        } else {
            (&instance.public_ip, "public")
        };

        let address = address.clone().ok_or_else(|| HostError::MissingAddress {
            id: instance.id.clone(),
            kind,
        })?;

        Ok(Socket::new(address, ""))
    }

    fn as_cred(&self) -> Option<&dyn Cred> {
        Some(self)
    }
}

impl Cred for Ec2Host {
    /// Empty credentials unless `getcred` is set.
    fn retrieve(&self) -> Result<Credentials, CredError> {
        if !self.get_cred {
            return Ok(Credentials::default());
        }

        let instance = self.instance()?;
        let key_name = instance
            .key_name
            .as_deref()
            .ok_or_else(|| CredError::MissingKeyPair {
                instance_id: instance.id.clone(),
            })?;
        let key_path = find_private_key(&self.ssh_dir, key_name)?;

        debug!(
            event = "core.ec2.password_started",
            instance_id = %instance.id,
            key = %key_path.display()
        );

        let password = self
            .aws
            .get_password_data(&self.target(), &instance.id, &key_path)
            .map_err(|e| CredError::PasswordData { source: e })?;

        if password.is_empty() {
            return Err(CredError::EmptyPasswordData {
                instance_id: instance.id.clone(),
            });
        }

        Ok(Credentials::new(ADMINISTRATOR, password))
    }
}
