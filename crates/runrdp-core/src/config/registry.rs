//! Kind registries for host and credential records.
//!
//! A registry maps the kind name used in configuration documents
//! (`host.<kind>.<name>`, `cred.<kind>.<name>`) to a constructor producing an
//! empty record of that kind. Hosts and creds have independent registries.

use std::sync::Arc;

use tracing::debug;

use crate::aws::AwsCli;
use crate::config::fields::{Record, global_field_collision};
use crate::config::types::RuntimeConfig;
use crate::creds::{CredRecord, SecretsManagerCred, ThycoticCred};
use crate::errors::ConfigError;
use crate::hosts::{BasicHost, Ec2Host, Host};
use crate::secret_server::{HttpSecretServer, TerminalPrompt};

use super::collaborators::Collaborators;

/// Produces an empty record of one kind.
pub type Constructor<T> = Box<dyn Fn() -> Box<T> + Send + Sync>;

/// Ordered map of kind name to constructor.
pub struct KindRegistry<T: Record + ?Sized> {
    category: &'static str,
    kinds: Vec<(&'static str, Constructor<T>)>,
}

impl<T: Record + ?Sized> KindRegistry<T> {
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            kinds: Vec::new(),
        }
    }

    /// Register a kind. Each kind may be registered once, and its record may
    /// not declare a field named like a global host field.
    pub fn register<F>(&mut self, kind: &'static str, constructor: F) -> Result<(), ConfigError>
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        if self.contains(kind) {
            return Err(ConfigError::DuplicateKind {
                category: self.category,
                kind: kind.to_string(),
            });
        }

        let sample = constructor();
        if let Some(field) = global_field_collision(sample.fields()) {
            return Err(ConfigError::GlobalFieldCollision {
                kind: kind.to_string(),
                field: field.to_string(),
            });
        }

        debug!(
            event = "core.registry.kind_registered",
            category = self.category,
            kind = kind
        );
        self.kinds.push((kind, Box::new(constructor)));
        Ok(())
    }

    /// A new empty record of the given kind.
    pub fn construct(&self, kind: &str) -> Result<Box<T>, ConfigError> {
        self.kinds
            .iter()
            .find(|(name, _)| *name == kind)
            .map(|(_, constructor)| constructor())
            .ok_or_else(|| ConfigError::UnknownKind {
                category: self.category,
                kind: kind.to_string(),
                supported: self.kinds().join(", "),
            })
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.iter().any(|(name, _)| *name == kind)
    }

    /// Registered kind names in registration order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|(name, _)| *name).collect()
    }
}

/// The host and cred registries used to load a configuration.
pub struct Registries {
    pub hosts: KindRegistry<dyn Host>,
    pub creds: KindRegistry<dyn CredRecord>,
}

impl Default for Registries {
    fn default() -> Self {
        Self::empty()
    }
}

impl Registries {
    /// Registries with no kinds registered.
    pub fn empty() -> Self {
        Self {
            hosts: KindRegistry::new("host"),
            creds: KindRegistry::new("cred"),
        }
    }

    /// Registries holding every built-in kind, wired to the given collaborators.
    pub fn with_builtin_kinds(
        runtime: &RuntimeConfig,
        collaborators: &Collaborators,
    ) -> Result<Self, ConfigError> {
        let mut registries = Self::empty();

        registries
            .hosts
            .register("basic", || Box::new(BasicHost) as Box<dyn Host>)?;

        let aws = Arc::clone(&collaborators.aws);
        let prompt = Arc::clone(&collaborators.prompt);
        let ssh_dir = runtime.ssh_dir.clone();
        let separator = runtime.tag_separator.clone();
        registries.hosts.register("awsec2", move || {
            Box::new(Ec2Host::new(
                Arc::clone(&aws),
                Arc::clone(&prompt),
                ssh_dir.clone(),
                separator.clone(),
            )) as Box<dyn Host>
        })?;

        let aws = Arc::clone(&collaborators.aws);
        registries.creds.register("awssm", move || {
            Box::new(SecretsManagerCred::new(Arc::clone(&aws))) as Box<dyn CredRecord>
        })?;

        let server = Arc::clone(&collaborators.secret_server);
        let prompt = Arc::clone(&collaborators.prompt);
        registries.creds.register("thycotic", move || {
            Box::new(ThycoticCred::new(Arc::clone(&server), Arc::clone(&prompt)))
                as Box<dyn CredRecord>
        })?;

        Ok(registries)
    }

    /// Built-in kinds wired to the real AWS CLI, secret server and terminal.
    pub fn from_runtime(runtime: &RuntimeConfig) -> Result<Self, ConfigError> {
        let collaborators = Collaborators {
            aws: Arc::new(AwsCli::new(&runtime.aws_cli)),
            secret_server: Arc::new(HttpSecretServer::new(
                &runtime.thycotic_url,
                &runtime.thycotic_domain,
            )),
            prompt: Arc::new(TerminalPrompt),
        };
        Self::with_builtin_kinds(runtime, &collaborators)
    }
}
