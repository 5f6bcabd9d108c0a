//! In-memory service implementations.
//!
//! These hold a fixed set of records and answer queries locally, which makes
//! them suitable as substitutes for the real catalog and data server in tests.

use regex::Regex;

use super::{
    CatalogQueryOptions, CatalogRecord, ChannelCatalog, ConnectionFactory, DiscoveryConnection,
    ForeignChannel, ServiceError,
};
use crate::name::split_type_suffix;
use crate::types::ChannelType;

/// Catalog answering substring queries over a fixed record set
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<CatalogRecord>,
}

impl StaticCatalog {
    /// Create a catalog holding `records`
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self { records }
    }
}

impl ChannelCatalog for StaticCatalog {
    fn query(
        &self,
        pattern: &str,
        options: &CatalogQueryOptions,
    ) -> Result<Vec<CatalogRecord>, ServiceError> {
        if options.debug {
            log::debug!("static catalog query for '{}'", pattern);
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.name.contains(pattern))
            .cloned()
            .collect())
    }
}

/// Discovery session over a fixed channel table.
///
/// Names are matched as glob patterns (`*` and `?`); a trailing `,<type>`
/// suffix on the requested name restricts the storage type just like the
/// explicit type argument does. Every request is recorded in
/// [`requests`](Self::requests).
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    channels: Vec<ForeignChannel>,
    requests: Vec<(String, Option<ChannelType>)>,
}

impl StaticDiscovery {
    /// Create a session that knows about `channels`
    pub fn new(channels: Vec<ForeignChannel>) -> Self {
        Self {
            channels,
            requests: Vec::new(),
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> &[(String, Option<ChannelType>)] {
        &self.requests
    }
}

impl DiscoveryConnection for StaticDiscovery {
    fn find_channels(
        &mut self,
        name: &str,
        channel_type: Option<ChannelType>,
    ) -> Result<Vec<ForeignChannel>, ServiceError> {
        self.requests.push((name.to_string(), channel_type));

        let (base, suffix_type) = split_type_suffix(name);
        let wanted = channel_type.or(suffix_type);
        let matcher = glob_to_regex(base)?;

        Ok(self
            .channels
            .iter()
            .filter(|c| matcher.is_match(&c.name))
            .filter(|c| wanted.map_or(true, |t| t.code() == c.channel_type))
            .cloned()
            .collect())
    }
}

fn glob_to_regex(glob: &str) -> Result<Regex, ServiceError> {
    let mut pattern = String::from("^");
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).map_err(|e| ServiceError::Protocol(e.to_string()))
}

/// Factory handing out [`StaticDiscovery`] sessions over a shared table
#[derive(Debug, Clone, Default)]
pub struct StaticDiscoveryFactory {
    channels: Vec<ForeignChannel>,
}

impl StaticDiscoveryFactory {
    /// Create a factory whose sessions know about `channels`
    pub fn new(channels: Vec<ForeignChannel>) -> Self {
        Self { channels }
    }
}

impl ConnectionFactory for StaticDiscoveryFactory {
    type Connection = StaticDiscovery;

    fn auth_connect(&self, host: &str, port: Option<u16>) -> Result<StaticDiscovery, ServiceError> {
        if host.trim().is_empty() {
            return Err(ServiceError::Connection {
                host: host.to_string(),
                reason: "empty host name".to_string(),
            });
        }
        log::debug!("static discovery session for {}:{:?}", host, port);
        Ok(StaticDiscovery::new(self.channels.clone()))
    }
}
