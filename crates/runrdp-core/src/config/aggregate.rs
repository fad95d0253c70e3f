//! Building a [`Configuration`] from loaded documents.
//!
//! Records live at `host.<kind>.<name>`, `cred.<kind>.<name>`,
//! `tunnel.<name>` and `settings.<name>`. Documents are processed in the
//! order given and keys within a document in sorted order. The first
//! failure aborts the load.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::configuration::Configuration;
use crate::config::fields::{Record, load_fields};
use crate::config::globals::HostGlobals;
use crate::config::loading::{Document, load_documents};
use crate::config::registry::Registries;
use crate::config::settings::Settings;
use crate::config::tunnel::Tunnel;
use crate::errors::ConfigError;
use crate::events;

const SECTION_HOST: &str = "host";
const SECTION_CRED: &str = "cred";
const SECTION_TUNNEL: &str = "tunnel";
const SECTION_SETTINGS: &str = "settings";

fn as_table<'a>(
    document: &Document,
    path: &str,
    value: &'a toml::Value,
    expected: &str,
) -> Result<&'a toml::Table, ConfigError> {
    value
        .as_table()
        .ok_or_else(|| ConfigError::MalformedDocument {
            document: document.name.clone(),
            path: path.to_string(),
            message: format!("expected {expected}, found {}", value.type_str()),
        })
}

/// Populate and validate one record.
fn load_record<R: Record + ?Sized>(
    record: &mut R,
    document: &Document,
    path: &str,
    name: &str,
    entry: &toml::Table,
) -> Result<(), ConfigError> {
    load_fields(record, entry).map_err(|e| ConfigError::RecordLoadFailed {
        document: document.name.clone(),
        path: path.to_string(),
        name: name.to_string(),
        source: Box::new(e),
    })?;

    record.validate().map_err(|reason| ConfigError::InvalidRecord {
        name: name.to_string(),
        reason,
    })
}

impl Configuration {
    /// Load every document in `dir` and aggregate them.
    pub fn load(dir: &Path, registries: &Registries) -> Result<Self, ConfigError> {
        let documents = load_documents(dir)?;
        let config = Self::from_documents(&documents, registries)?;
        events::log_config_loaded(dir, &config);
        Ok(config)
    }

    pub fn from_documents(
        documents: &[Document],
        registries: &Registries,
    ) -> Result<Self, ConfigError> {
        let mut config = Configuration::new();

        for document in documents {
            for (section, value) in &document.table {
                match section.as_str() {
                    SECTION_HOST => config.load_hosts(document, value, registries)?,
                    SECTION_CRED => config.load_creds(document, value, registries)?,
                    SECTION_TUNNEL => config.load_tunnels(document, value)?,
                    SECTION_SETTINGS => config.load_settings(document, value)?,
                    other => warn!(
                        event = "core.config.unknown_section",
                        document = %document.name,
                        section = other
                    ),
                }
            }
        }

        info!(
            event = "core.config.aggregate_completed",
            documents = documents.len(),
            hosts = config.host_count(),
            creds = config.cred_count(),
            tunnels = config.tunnel_count(),
            settings = config.settings_count()
        );

        Ok(config)
    }

    fn load_hosts(
        &mut self,
        document: &Document,
        value: &toml::Value,
        registries: &Registries,
    ) -> Result<(), ConfigError> {
        let kinds = as_table(document, SECTION_HOST, value, "a table of host kinds")?;

        for (kind, entries) in kinds {
            let path = format!("{SECTION_HOST}.{kind}");
            let entries = as_table(document, &path, entries, "a table of hosts")?;

            for (name, entry) in entries {
                let entry_path = format!("{path}.{name}");
                let entry = as_table(document, &entry_path, entry, "a table")?;

                if self.host_exists(name) {
                    return Err(ConfigError::DuplicateName {
                        category: "host",
                        name: name.clone(),
                    });
                }

                let mut record = registries.hosts.construct(kind)?;
                let globals = HostGlobals::from_table(name, entry).map_err(|e| {
                    ConfigError::RecordLoadFailed {
                        document: document.name.clone(),
                        path: path.clone(),
                        name: name.clone(),
                        source: Box::new(e),
                    }
                })?;
                load_record(record.as_mut(), document, &path, name, entry)?;

                debug!(
                    event = "core.config.host_loaded",
                    document = %document.name,
                    kind = %kind,
                    name = %name
                );
                self.insert_host(name, record, globals, &document.name)?;
            }
        }

        Ok(())
    }

    fn load_creds(
        &mut self,
        document: &Document,
        value: &toml::Value,
        registries: &Registries,
    ) -> Result<(), ConfigError> {
        let kinds = as_table(document, SECTION_CRED, value, "a table of cred kinds")?;

        for (kind, entries) in kinds {
            let path = format!("{SECTION_CRED}.{kind}");
            let entries = as_table(document, &path, entries, "a table of creds")?;

            for (name, entry) in entries {
                let entry_path = format!("{path}.{name}");
                let entry = as_table(document, &entry_path, entry, "a table")?;

                if self.cred(name).is_some() {
                    return Err(ConfigError::DuplicateName {
                        category: "cred",
                        name: name.clone(),
                    });
                }

                let mut record = registries.creds.construct(kind)?;
                load_record(record.as_mut(), document, &path, name, entry)?;

                debug!(
                    event = "core.config.cred_loaded",
                    document = %document.name,
                    kind = %kind,
                    name = %name
                );
                self.insert_cred(name, record)?;
            }
        }

        Ok(())
    }

    fn load_tunnels(&mut self, document: &Document, value: &toml::Value) -> Result<(), ConfigError> {
        let entries = as_table(document, SECTION_TUNNEL, value, "a table of tunnels")?;

        for (name, entry) in entries {
            let entry_path = format!("{SECTION_TUNNEL}.{name}");
            let entry = as_table(document, &entry_path, entry, "a table")?;

            let mut tunnel = Tunnel::default();
            load_record(&mut tunnel, document, SECTION_TUNNEL, name, entry)?;
            self.insert_tunnel(name, tunnel)?;
        }

        Ok(())
    }

    fn load_settings(&mut self, document: &Document, value: &toml::Value) -> Result<(), ConfigError> {
        let entries = as_table(document, SECTION_SETTINGS, value, "a table of settings")?;

        for (name, entry) in entries {
            let entry_path = format!("{SECTION_SETTINGS}.{name}");
            let entry = as_table(document, &entry_path, entry, "a table")?;

            let mut settings = Settings::default();
            load_record(&mut settings, document, SECTION_SETTINGS, name, entry)?;
            self.insert_settings(name, settings)?;
        }

        Ok(())
    }
}
