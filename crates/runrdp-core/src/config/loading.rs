//! Configuration document loading.
//!
//! Every `*.toml` file in the configuration directory is one document. Files
//! are read in file-name order so that load errors are deterministic.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::ConfigError;

/// One parsed configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name, used in error messages.
    pub name: String,
    pub table: toml::Table,
}

/// Parse a document from TOML text.
///
/// Keys are case-insensitive: every table key is lower-cased, so
/// `[host.basic.Web]` and `Address = ".."` read as `web` and `address`.
pub fn parse_document(name: &str, text: &str) -> Result<Document, ConfigError> {
    let table: toml::Table = toml::from_str(text).map_err(|e| ConfigError::ConfigParseError {
        path: name.to_string(),
        message: e.to_string(),
    })?;

    Ok(Document {
        name: name.to_string(),
        table: fold_key_case(name, "", table)?,
    })
}

/// Lower-case every key of `table` and its nested tables.
///
/// Two keys of one table that differ only in case are an error.
fn fold_key_case(
    document: &str,
    path: &str,
    table: toml::Table,
) -> Result<toml::Table, ConfigError> {
    let mut folded = toml::Table::new();

    for (key, value) in table {
        let lower = key.to_lowercase();
        let key_path = if path.is_empty() {
            lower.clone()
        } else {
            format!("{path}.{lower}")
        };

        let value = match value {
            toml::Value::Table(inner) => {
                toml::Value::Table(fold_key_case(document, &key_path, inner)?)
            }
            other => other,
        };

        if folded.insert(lower, value).is_some() {
            return Err(ConfigError::MalformedDocument {
                document: document.to_string(),
                path: key_path,
                message: format!("key '{key}' differs from another key only in case"),
            });
        }
    }

    Ok(folded)
}

/// Load every `*.toml` document in `dir`, sorted by file name.
///
/// A missing directory yields no documents. Unreadable directories and files,
/// and files that are not valid TOML, are errors.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>, ConfigError> {
    if !dir.exists() {
        info!(
            event = "core.config.directory_missing",
            path = %dir.display()
        );
        return Ok(Vec::new());
    }

    let io_error = |path: &Path, e: std::io::Error| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        documents.push(parse_document(&name, &text)?);
        debug!(event = "core.config.document_loaded", document = %name);
    }

    info!(
        event = "core.config.documents_loaded",
        path = %dir.display(),
        count = documents.len()
    );

    Ok(documents)
}
