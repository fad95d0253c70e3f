//! Display settings records (`[settings.<name>]`).

use serde::Serialize;

use crate::config::fields::{FieldKind, FieldSpec, FieldValue, Record, unhandled_field};
use crate::errors::ConfigError;

/// Name of the settings record used when a host names none.
pub const DEFAULT_SETTINGS_NAME: &str = "default";

/// Smallest accepted width or height.
pub const MIN_DIMENSION: i64 = 200;
/// Largest accepted width or height.
pub const MAX_DIMENSION: i64 = 8192;
/// Accepted display scale percentages.
pub const VALID_SCALES: &[i64] = &[100, 125, 150, 175, 200, 250, 300, 400, 500];

const SETTINGS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("height", FieldKind::Integer),
    FieldSpec::new("width", FieldKind::Integer),
    FieldSpec::new("scale", FieldKind::Integer),
];

/// Remote desktop display parameters. A zero value means "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub height: i64,
    pub width: i64,
    pub scale: i64,
}

fn check_dimension(label: &str, value: i64) -> Result<(), String> {
    if value != 0 && !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        return Err(format!(
            "{label} value {value} is invalid, must be between {MIN_DIMENSION} and {MAX_DIMENSION}"
        ));
    }
    Ok(())
}

impl Record for Settings {
    fn kind(&self) -> &'static str {
        "settings"
    }

    fn fields(&self) -> &'static [FieldSpec] {
        SETTINGS_FIELDS
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigError> {
        match (name, value) {
            ("height", FieldValue::Integer(v)) => self.height = v,
            ("width", FieldValue::Integer(v)) => self.width = v,
            ("scale", FieldValue::Integer(v)) => self.scale = v,
            _ => return Err(unhandled_field(self.kind(), name)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;

        if self.scale != 0 && !VALID_SCALES.contains(&self.scale) {
            let valid: Vec<String> = VALID_SCALES.iter().map(|s| s.to_string()).collect();
            return Err(format!(
                "scale value {} is invalid, must be one of {}",
                self.scale,
                valid.join(", ")
            ));
        }

        Ok(())
    }
}
