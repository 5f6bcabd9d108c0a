//! # Remote metadata services
//!
//! Channel metadata is resolved against two kinds of remote service, both of
//! which live outside this crate and are consumed through narrow traits:
//!
//! 1. **Channel catalog** ([`ChannelCatalog`]): an HTTP channel-information
//!    service queried by name pattern, returning [`CatalogRecord`]s.
//! 2. **Discovery connection** ([`DiscoveryConnection`]): a persistent
//!    data-server session that enumerates [`ForeignChannel`] descriptors by
//!    name and storage type. Connections are produced by a
//!    [`ConnectionFactory`] from a host/port pair.
//!
//! The [`memory`] submodule provides in-process implementations used by the
//! test-suite and for offline use.

mod error;
pub mod memory;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::ChannelType;

pub use error::ServiceError;
pub use memory::{StaticCatalog, StaticDiscovery, StaticDiscoveryFactory};

/// Options forwarded to a catalog lookup
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CatalogQueryOptions {
    /// Print verbose connection status
    pub debug: bool,
    /// Maximum time to wait for a response
    pub timeout: Option<Duration>,
}

/// A raw channel record as returned by the channel catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Full channel name
    pub name: String,

    /// Sample rate in Hz
    #[serde(default, alias = "sample_rate")]
    pub datarate: Option<f64>,

    /// Unit string of the samples
    #[serde(default, alias = "unit")]
    pub units: Option<String>,

    /// DAQ data type code
    #[serde(default)]
    pub datatype: Option<u32>,

    /// Front-end model producing the channel
    #[serde(default, alias = "model")]
    pub source: Option<String>,

    /// Browser URL of the catalog entry
    #[serde(default, alias = "url")]
    pub displayurl: Option<String>,
}

/// Channel descriptor as reported by a discovery connection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignChannel {
    /// Full channel name
    pub name: String,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Unit string; empty when unknown
    pub signal_units: String,
    /// Protocol channel-type code
    pub channel_type: u32,
    /// Protocol data-type code
    pub data_type: u32,
}

/// Channel information catalog
pub trait ChannelCatalog {
    /// Return every record whose name matches `pattern`
    fn query(
        &self,
        pattern: &str,
        options: &CatalogQueryOptions,
    ) -> Result<Vec<CatalogRecord>, ServiceError>;
}

/// Open session against a data server that can enumerate channels
pub trait DiscoveryConnection {
    /// Return every channel matching `name`, optionally restricted to one
    /// storage type
    fn find_channels(
        &mut self,
        name: &str,
        channel_type: Option<ChannelType>,
    ) -> Result<Vec<ForeignChannel>, ServiceError>;
}

/// Opens authenticated discovery connections
pub trait ConnectionFactory {
    /// Connection type produced by this factory
    type Connection: DiscoveryConnection;

    /// Connect to `host`, on the default port when `port` is `None`
    fn auth_connect(&self, host: &str, port: Option<u16>) -> Result<Self::Connection, ServiceError>;
}

impl<T: ChannelCatalog + ?Sized> ChannelCatalog for &T {
    fn query(
        &self,
        pattern: &str,
        options: &CatalogQueryOptions,
    ) -> Result<Vec<CatalogRecord>, ServiceError> {
        (**self).query(pattern, options)
    }
}

impl<T: DiscoveryConnection + ?Sized> DiscoveryConnection for &mut T {
    fn find_channels(
        &mut self,
        name: &str,
        channel_type: Option<ChannelType>,
    ) -> Result<Vec<ForeignChannel>, ServiceError> {
        (**self).find_channels(name, channel_type)
    }
}
