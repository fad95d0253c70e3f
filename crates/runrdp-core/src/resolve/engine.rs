//! Per-host resolution queries.
//!
//! Each value is merged from up to three sources ordered least to most
//! preferred. A later source only replaces a value when it supplies a
//! non-empty one, so an empty string never erases what an earlier source
//! found.

use tracing::debug;

use crate::config::{Configuration, GlobalField, HostEntry, Record, Settings, Tunnel};
use crate::creds::{Cred, Credentials};
use crate::hosts::{Host, Socket};

use super::errors::ResolveError;

/// Replace `target` with `candidate` unless the candidate is empty.
pub(crate) fn overwrite(target: &mut String, candidate: &str) {
    if !candidate.is_empty() {
        *target = candidate.to_string();
    }
}

impl Configuration {
    fn entry(&self, name: &str) -> Result<&HostEntry, ResolveError> {
        self.host_entry(name)
            .ok_or_else(|| ResolveError::HostNotFound {
                name: name.to_string(),
            })
    }

    /// Configured host name matching `name`, exactly or ignoring case.
    ///
    /// Loaded names are lower-case, so `WEB` finds `web`. A case-insensitive
    /// match is only returned when it is unique.
    pub fn lookup_host_name(&self, name: &str) -> Option<&str> {
        if let Some(entry) = self.host_names().into_iter().find(|h| *h == name) {
            return Some(entry);
        }
        let mut matches = self
            .host_names()
            .into_iter()
            .filter(|h| h.eq_ignore_ascii_case(name));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Address and port of a host.
    ///
    /// 1. the host record's own socket
    /// 2. the host's `address` and `port` globals
    /// 3. the address of the host named by `proxy`, unless `suppress_proxy`
    ///
    /// The proxy host is resolved with its own proxy suppressed.
    pub fn host_socket(&self, name: &str, suppress_proxy: bool) -> Result<Socket, ResolveError> {
        let entry = self.entry(name)?;

        let mut socket = entry
            .record
            .socket()
            .map_err(|e| ResolveError::SocketFailed {
                host: name.to_string(),
                source: e,
            })?;

        overwrite(&mut socket.address, entry.globals.get(GlobalField::Address));
        overwrite(&mut socket.port, entry.globals.get(GlobalField::Port));

        if !suppress_proxy && let Some(proxy) = entry.globals.non_empty(GlobalField::Proxy) {
            if !self.host_exists(proxy) {
                return Err(ResolveError::ProxyNotFound {
                    host: name.to_string(),
                    proxy: proxy.to_string(),
                });
            }

            let proxied =
                self.host_socket(proxy, true)
                    .map_err(|e| ResolveError::ProxySocketFailed {
                        proxy: proxy.to_string(),
                        source: Box::new(e),
                    })?;
            debug!(
                event = "core.resolve.proxy_applied",
                host = name,
                proxy = proxy,
                address = %proxied.address
            );
            overwrite(&mut socket.address, &proxied.address);
        }

        debug!(
            event = "core.resolve.socket_completed",
            host = name,
            address = %socket.address,
            port = %socket.port
        );
        Ok(socket)
    }

    /// Username and password of a host.
    ///
    /// 1. the cred record named by the host's `cred` global
    /// 2. the host record itself, when its kind can supply credentials
    /// 3. the host's `username` global (username only)
    pub fn host_credentials(&self, name: &str) -> Result<Credentials, ResolveError> {
        let entry = self.entry(name)?;
        let mut credentials = Credentials::default();

        if let Some(cred_name) = entry.globals.non_empty(GlobalField::Cred) {
            let cred = self
                .cred(cred_name)
                .ok_or_else(|| ResolveError::CredNotFound {
                    host: name.to_string(),
                    cred: cred_name.to_string(),
                })?;
            let found = cred.retrieve().map_err(|e| ResolveError::RetrieveFailed {
                host: name.to_string(),
                origin: format!("cred '{cred_name}'"),
                source: e,
            })?;
            overwrite(&mut credentials.username, &found.username);
            overwrite(&mut credentials.password, &found.password);
        }

        if let Some(own) = entry.record.as_cred() {
            let found = own.retrieve().map_err(|e| ResolveError::RetrieveFailed {
                host: name.to_string(),
                origin: format!("{} host record", entry.record.kind()),
                source: e,
            })?;
            overwrite(&mut credentials.username, &found.username);
            overwrite(&mut credentials.password, &found.password);
        }

        overwrite(
            &mut credentials.username,
            entry.globals.get(GlobalField::Username),
        );

        debug!(
            event = "core.resolve.credentials_completed",
            host = name,
            username = %credentials.username,
            has_password = !credentials.password.is_empty()
        );
        Ok(credentials)
    }

    /// The tunnel named by the host's `tunnel` global, if any.
    pub fn host_tunnel(&self, name: &str) -> Result<Option<&Tunnel>, ResolveError> {
        let entry = self.entry(name)?;
        let Some(tunnel_name) = entry.globals.non_empty(GlobalField::Tunnel) else {
            return Ok(None);
        };

        self.tunnel(tunnel_name)
            .map(Some)
            .ok_or_else(|| ResolveError::TunnelNotFound {
                host: name.to_string(),
                tunnel: tunnel_name.to_string(),
            })
    }

    /// The settings named by the host's `settings` global, if any.
    pub fn host_settings(&self, name: &str) -> Result<Option<&Settings>, ResolveError> {
        let entry = self.entry(name)?;
        let Some(settings_name) = entry.globals.non_empty(GlobalField::Settings) else {
            return Ok(None);
        };

        self.settings(settings_name)
            .map(Some)
            .ok_or_else(|| ResolveError::SettingsNotFound {
                host: name.to_string(),
                settings: settings_name.to_string(),
            })
    }
}
