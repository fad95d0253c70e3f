//! Field loading for configuration records.
//!
//! Configuration documents are untyped TOML tables. Each record kind declares
//! a static table of its fields and the kind of value each one accepts;
//! [`load_fields`] walks an entry, checks every value against that table and
//! hands the typed [`FieldValue`] to the record's own decoder.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::globals::is_global_field;
use crate::errors::ConfigError;

/// The kind of value a record field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Integer,
    String,
    /// A table of string values: `{ key1 = "val1", key2 = "val2" }`
    Map,
    /// An array of strings: `["a", "b", "c"]`
    List,
}

impl FieldKind {
    /// Description used in type mismatch errors.
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Bool => "value of type bool",
            FieldKind::Integer => "value of type integer",
            FieldKind::String => "value of type string",
            FieldKind::Map => r#"table of strings ({ key1 = "val1", key2 = "val2" })"#,
            FieldKind::List => r#"array of strings (["a", "b", "c"])"#,
        }
    }
}

/// A type-checked field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    String(String),
    Map(BTreeMap<String, String>),
    List(Vec<String>),
}

/// A field declared by a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Lower-case key as written in configuration documents.
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A record that can be populated from a configuration entry.
pub trait Record {
    /// Kind name used in error messages (e.g. "awsec2", "tunnel").
    fn kind(&self) -> &'static str;

    /// Fields this record accepts.
    fn fields(&self) -> &'static [FieldSpec];

    /// Store a value that has already been checked against [`Record::fields`].
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigError>;

    /// Check the loaded values. Called once after loading.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Error for a field name a record's decoder does not handle.
///
/// Decoders return this from their fallback arm; it only fires when the field
/// table and the decoder disagree.
pub fn unhandled_field(kind: &str, name: &str) -> ConfigError {
    ConfigError::InvalidKey {
        kind: kind.to_string(),
        key: name.to_string(),
    }
}

/// Find the first declared field whose name is reserved for global host fields.
pub fn global_field_collision(fields: &[FieldSpec]) -> Option<&'static str> {
    fields
        .iter()
        .map(|f| f.name)
        .find(|name| is_global_field(name))
}

/// Populate a record's fields from a configuration entry.
///
/// Global host field names are skipped. Any other key must match a declared
/// field exactly and its value must have the declared kind. Fields set before
/// an error stay set; the caller must discard the record on error.
pub fn load_fields<R: Record + ?Sized>(
    record: &mut R,
    attributes: &toml::Table,
) -> Result<(), ConfigError> {
    let fields = record.fields();

    for (key, raw) in attributes {
        if is_global_field(key) {
            continue;
        }

        let Some(spec) = fields.iter().find(|f| f.name == key.as_str()) else {
            return Err(ConfigError::InvalidKey {
                kind: record.kind().to_string(),
                key: key.clone(),
            });
        };

        let value = convert(record.kind(), spec, raw)?;
        record.set_field(spec.name, value)?;
    }

    debug!(
        event = "core.fields.load_completed",
        kind = record.kind(),
        count = attributes.len()
    );

    Ok(())
}

fn convert(kind: &str, spec: &FieldSpec, raw: &toml::Value) -> Result<FieldValue, ConfigError> {
    let mismatch = |expected: String| ConfigError::FieldTypeMismatch {
        kind: kind.to_string(),
        field: spec.name.to_string(),
        expected,
    };

    match (spec.kind, raw) {
        (FieldKind::Bool, toml::Value::Boolean(v)) => Ok(FieldValue::Bool(*v)),
        (FieldKind::Integer, toml::Value::Integer(v)) => Ok(FieldValue::Integer(*v)),
        (FieldKind::String, toml::Value::String(v)) => Ok(FieldValue::String(v.clone())),
        (FieldKind::Map, toml::Value::Table(table)) => {
            let mut map = BTreeMap::new();
            for (k, v) in table {
                let toml::Value::String(s) = v else {
                    return Err(mismatch(format!(
                        "{} (entry '{}' is not a string)",
                        spec.kind.expected(),
                        k
                    )));
                };
                map.insert(k.clone(), s.clone());
            }
            Ok(FieldValue::Map(map))
        }
        (FieldKind::List, toml::Value::Array(items)) => {
            let mut list = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let toml::Value::String(s) = item else {
                    return Err(mismatch(format!(
                        "{} (array item {} is not a string)",
                        spec.kind.expected(),
                        i
                    )));
                };
                list.push(s.clone());
            }
            Ok(FieldValue::List(list))
        }
        (expected, _) => Err(mismatch(expected.expected().to_string())),
    }
}
