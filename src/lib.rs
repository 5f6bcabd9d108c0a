//! # gwchannel - Interferometer Data Channel Metadata
//!
//! `gwchannel` models the metadata of interferometer data channels (name,
//! sample rate, physical unit, storage type, numeric sample type, front-end
//! model and catalog locator) and provides lookup, filtering, resolution
//! against remote metadata services and data-availability reporting for sets
//! of channels.
//!
//! ## Key Features
//!
//! - **Name Grammar**: Channel names such as `H1:LSC-DARM_ERR,m-trend` are
//!   decomposed into interferometer, system, subsystem, signal and storage
//!   type.
//!
//! - **Validated Records**: Every field of a [`Channel`](channel::Channel) is
//!   validated on the way in; name components are derived and always agree
//!   with the name.
//!
//! - **Copy-with-overrides**: [`ChannelBuilder`](channel::ChannelBuilder)
//!   builds a channel from another one, replacing only the fields given.
//!
//! - **Sieving**: Multi-criterion filtering of a
//!   [`ChannelList`](channel::ChannelList) by name pattern, sample rate and
//!   any attribute.
//!
//! - **Service Resolution**: Catalog and data-server lookups go through narrow
//!   traits in [`services`], with in-memory implementations for offline use.
//!
//! - **Availability**: When data exist, per storage type, from the external
//!   `nds2_channel_source` tool, clipped and coalesced into
//!   [`SegmentList`](segments::SegmentList)s.
//!
//! ## Quick Start
//!
//! ```rust
//! use gwchannel::channel::{Channel, ChannelList, Sieve};
//! use gwchannel::types::ChannelType;
//!
//! let list = ChannelList::from_names(["H1:LSC-DARM_ERR, L1:LSC-DARM_ERR,m-trend"]);
//! assert_eq!(list.len(), 2);
//! assert_eq!(list[1].channel_type(), Some(ChannelType::MTrend));
//!
//! let hanford = list.sieve(&Sieve::new().name("^H1:"))?;
//! assert_eq!(hanford.names(), vec!["H1:LSC-DARM_ERR"]);
//!
//! let fast = Channel::builder_from(&hanford[0]).sample_rate(16384.0).build()?;
//! assert_eq!(fast.ifo(), Some("H1"));
//! # Ok::<(), gwchannel::channel::ChannelError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`name`]: Channel-name grammar
//! - [`types`]: Validated value types (storage type, data type, rate, unit)
//! - [`channel`]: `Channel`, `ChannelList` and the sieve
//! - [`services`]: Catalog and discovery traits with in-memory implementations
//! - [`segments`]: GPS segments and coalescing
//! - [`time`]: Conversion to GPS seconds
//! - [`availability`]: Availability tool invocation, output parsing and report

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod availability;
pub mod channel;
pub mod name;
pub mod segments;
pub mod services;
pub mod time;
pub mod types;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::availability::{
        query_availability, AvailabilityConfig, AvailabilityError, AvailabilityReport,
        AvailabilityResolver, RequestedChannel,
    };
    pub use crate::channel::{
        AttributeFilter, Channel, ChannelBuilder, ChannelError, ChannelList, Sieve,
    };
    pub use crate::name::{parse_channel_name, ChannelNameParts};
    pub use crate::segments::{Segment, SegmentList};
    pub use crate::services::{
        CatalogQueryOptions, ChannelCatalog, ConnectionFactory, DiscoveryConnection, ServiceError,
    };
    pub use crate::time::{TimeError, ToGps};
    pub use crate::types::{ChannelType, DataType, SampleRate, Unit, ValueError};
}
