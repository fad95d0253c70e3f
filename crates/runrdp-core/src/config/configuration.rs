//! The loaded configuration.
//!
//! Hosts, creds, tunnels and settings are separate namespaces. Names are
//! unique within a namespace across every document. The configuration is
//! immutable once loaded; only host records may cache their own lookups.

use std::collections::BTreeMap;

use crate::config::globals::HostGlobals;
use crate::config::settings::Settings;
use crate::config::tunnel::Tunnel;
use crate::creds::CredRecord;
use crate::errors::ConfigError;
use crate::hosts::Host;

/// A host record with its global fields.
pub struct HostEntry {
    pub record: Box<dyn Host>,
    pub globals: HostGlobals,
    /// Document the host was declared in.
    pub document: String,
}

#[derive(Default)]
pub struct Configuration {
    hosts: BTreeMap<String, HostEntry>,
    creds: BTreeMap<String, Box<dyn CredRecord>>,
    tunnels: BTreeMap<String, Tunnel>,
    settings: BTreeMap<String, Settings>,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("hosts", &self.hosts.keys().collect::<Vec<_>>())
            .field("creds", &self.creds.keys().collect::<Vec<_>>())
            .field("tunnels", &self.tunnels)
            .field("settings", &self.settings)
            .finish()
    }
}

fn duplicate(category: &'static str, name: &str) -> ConfigError {
    ConfigError::DuplicateName {
        category,
        name: name.to_string(),
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_host(
        &mut self,
        name: &str,
        record: Box<dyn Host>,
        globals: HostGlobals,
        document: &str,
    ) -> Result<(), ConfigError> {
        if self.hosts.contains_key(name) {
            return Err(duplicate("host", name));
        }
        self.hosts.insert(
            name.to_string(),
            HostEntry {
                record,
                globals,
                document: document.to_string(),
            },
        );
        Ok(())
    }

    pub fn insert_cred(&mut self, name: &str, record: Box<dyn CredRecord>) -> Result<(), ConfigError> {
        if self.creds.contains_key(name) {
            return Err(duplicate("cred", name));
        }
        self.creds.insert(name.to_string(), record);
        Ok(())
    }

    pub fn insert_tunnel(&mut self, name: &str, tunnel: Tunnel) -> Result<(), ConfigError> {
        if self.tunnels.contains_key(name) {
            return Err(duplicate("tunnel", name));
        }
        self.tunnels.insert(name.to_string(), tunnel);
        Ok(())
    }

    pub fn insert_settings(&mut self, name: &str, settings: Settings) -> Result<(), ConfigError> {
        if self.settings.contains_key(name) {
            return Err(duplicate("settings", name));
        }
        self.settings.insert(name.to_string(), settings);
        Ok(())
    }

    pub fn host_entry(&self, name: &str) -> Option<&HostEntry> {
        self.hosts.get(name)
    }

    pub fn host(&self, name: &str) -> Option<&dyn Host> {
        self.hosts.get(name).map(|entry| entry.record.as_ref())
    }

    pub fn globals(&self, name: &str) -> Option<&HostGlobals> {
        self.hosts.get(name).map(|entry| &entry.globals)
    }

    pub fn cred(&self, name: &str) -> Option<&dyn CredRecord> {
        self.creds.get(name).map(|record| record.as_ref())
    }

    pub fn tunnel(&self, name: &str) -> Option<&Tunnel> {
        self.tunnels.get(name)
    }

    pub fn settings(&self, name: &str) -> Option<&Settings> {
        self.settings.get(name)
    }

    /// Every host name, sorted.
    pub fn host_names(&self) -> Vec<&str> {
        self.hosts.keys().map(String::as_str).collect()
    }

    pub fn host_exists(&self, name: &str) -> bool {
        self.hosts.contains_key(name)
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn cred_count(&self) -> usize {
        self.creds.len()
    }

    pub fn tunnel_count(&self) -> usize {
        self.tunnels.len()
    }

    pub fn settings_count(&self) -> usize {
        self.settings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::BasicHost;

    #[test]
    fn test_namespaces_are_separate() {
        let mut config = Configuration::new();
        config
            .insert_host("web", Box::new(BasicHost), HostGlobals::default(), "a.toml")
            .unwrap();
        config.insert_tunnel("web", Tunnel::default()).unwrap();
        config.insert_settings("web", Settings::default()).unwrap();

        assert!(config.host_exists("web"));
        assert!(config.tunnel("web").is_some());
        assert!(config.settings("web").is_some());
        assert!(config.cred("web").is_none());
    }

    #[test]
    fn test_duplicate_host_rejected() {
        let mut config = Configuration::new();
        config
            .insert_host("web", Box::new(BasicHost), HostGlobals::default(), "a.toml")
            .unwrap();
        let err = config
            .insert_host("web", Box::new(BasicHost), HostGlobals::default(), "b.toml")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateName { category: "host", ref name } if name == "web"
        ));
        assert_eq!(config.host_entry("web").unwrap().document, "a.toml");
    }

    #[test]
    fn test_host_names_sorted() {
        let mut config = Configuration::new();
        for name in ["zeta", "alpha", "mid"] {
            config
                .insert_host(name, Box::new(BasicHost), HostGlobals::default(), "a.toml")
                .unwrap();
        }
        assert_eq!(config.host_names(), vec!["alpha", "mid", "zeta"]);
        assert_eq!(config.host_count(), 3);
    }
}
