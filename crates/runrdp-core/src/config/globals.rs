//! Global host fields.
//!
//! A fixed set of attributes that may be attached to any `host.<kind>.<name>`
//! entry regardless of kind. They are extracted here and never reach the
//! kind-specific field decoder.

use std::collections::HashMap;

use crate::errors::ConfigError;

/// Names of fields which may be configured in any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalField {
    Cred,
    Proxy,
    Address,
    Port,
    Username,
    Tunnel,
    Settings,
}

impl GlobalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalField::Cred => "cred",
            GlobalField::Proxy => "proxy",
            GlobalField::Address => "address",
            GlobalField::Port => "port",
            GlobalField::Username => "username",
            GlobalField::Tunnel => "tunnel",
            GlobalField::Settings => "settings",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.as_str() == name)
    }

    pub fn all() -> &'static [GlobalField] {
        &[
            GlobalField::Cred,
            GlobalField::Proxy,
            GlobalField::Address,
            GlobalField::Port,
            GlobalField::Username,
            GlobalField::Tunnel,
            GlobalField::Settings,
        ]
    }
}

impl std::fmt::Display for GlobalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns true if the given name is a global host field name.
pub fn is_global_field(name: &str) -> bool {
    GlobalField::parse(name).is_some()
}

/// Global field values of one host. Unset fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostGlobals {
    values: HashMap<GlobalField, String>,
}

impl HostGlobals {
    /// Extract the global fields from a host entry.
    ///
    /// Kind-specific keys are ignored. A global given a non-string value is an
    /// error.
    pub fn from_table(host: &str, table: &toml::Table) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();

        for field in GlobalField::all() {
            match table.get(field.as_str()) {
                None => {}
                Some(toml::Value::String(value)) => {
                    values.insert(*field, value.clone());
                }
                Some(_) => {
                    return Err(ConfigError::NonStringGlobal {
                        host: host.to_string(),
                        field: field.as_str().to_string(),
                    });
                }
            }
        }

        Ok(Self { values })
    }

    /// Value of a global field, or `""` when not set.
    pub fn get(&self, field: GlobalField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Value of a global field when set to a non-empty string.
    pub fn non_empty(&self, field: GlobalField) -> Option<&str> {
        Some(self.get(field)).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: GlobalField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }
}
