//! # Channels and channel lists
//!
//! This module provides the [`Channel`] metadata record and the
//! [`ChannelList`] collection built on top of it.
//!
//! ## Channel identity
//!
//! A channel is identified by its name, which follows the convention
//! `IFO:SYSTEM-SUBSYSTEM_SIGNAL` (see [`crate::name`]). The name components
//! are derived and can't be set independently; everything else (sample rate,
//! unit, dtype, storage type, model, URL) is validated on the way in.
//!
//! ## Operations
//!
//! 1. **Construction**: [`Channel::new`] from a bare name, or
//!    [`ChannelBuilder`] for validated fields and copy-with-overrides
//! 2. **Parsing lists**: [`ChannelList::from_names`] splits comma-separated
//!    name strings, honouring `,<type>` suffixes
//! 3. **Filtering**: [`ChannelList::sieve`] with a [`Sieve`] of criteria
//! 4. **Resolution**: catalog and discovery queries against the traits in
//!    [`crate::services`]

#[allow(clippy::module_inception)]
mod channel;
mod error;
mod list;
mod query;
mod sieve;


pub use channel::{Channel, ChannelBuilder};
pub use error::ChannelError;
pub use list::{split_names, ChannelList};
pub use sieve::{AttributeFilter, NamePattern, Sieve};
