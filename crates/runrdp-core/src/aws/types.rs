use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Instance state name of a connectable instance.
pub const STATE_RUNNING: &str = "running";

/// Profile and region an AWS call is made with. Empty means "CLI default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsTarget {
    pub profile: String,
    pub region: String,
}

impl AwsTarget {
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
        }
    }
}

/// A describe-instances filter, serialized in the shape the API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceFilter {
    pub name: String,
    pub values: Vec<String>,
}

impl InstanceFilter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }
}

/// Selection criteria for a describe-instances call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceQuery {
    pub instance_id: Option<String>,
    pub filters: Vec<InstanceFilter>,
}

impl InstanceQuery {
    /// Add a filter value, merging values for a filter name seen before.
    pub fn push_filter(&mut self, name: String, value: String) {
        match self.filters.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.values.push(value),
            None => self.filters.push(InstanceFilter {
                name,
                values: vec![value],
            }),
        }
    }
}

/// The parts of an EC2 instance needed to connect to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceDescriptor {
    pub id: String,
    pub state: String,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub key_name: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl InstanceDescriptor {
    pub fn is_running(&self) -> bool {
        self.state == STATE_RUNNING
    }

    /// Value of the `Name` tag, or empty.
    pub fn name(&self) -> &str {
        self.tags.get("Name").map(String::as_str).unwrap_or("")
    }
}

// Wire shapes of the AWS CLI JSON output.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DescribeInstancesOutput {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Reservation {
    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawInstance {
    pub instance_id: String,
    pub state: RawState,
    pub public_ip_address: Option<String>,
    pub private_ip_address: Option<String>,
    pub key_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawState {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawTag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl From<RawInstance> for InstanceDescriptor {
    fn from(raw: RawInstance) -> Self {
        Self {
            id: raw.instance_id,
            state: raw.state.name,
            public_ip: raw.public_ip_address.filter(|ip| !ip.is_empty()),
            private_ip: raw.private_ip_address.filter(|ip| !ip.is_empty()),
            key_name: raw.key_name.filter(|k| !k.is_empty()),
            tags: raw.tags.into_iter().map(|t| (t.key, t.value)).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PasswordDataOutput {
    #[serde(default)]
    pub password_data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SecretValueOutput {
    pub secret_string: Option<String>,
}
