//! # Channel value types
//!
//! Validated value types carried by a [`Channel`](crate::channel::Channel):
//!
//! - [`ChannelType`]: DAQ storage type with its discovery-protocol code and
//!   case-insensitive alias table
//! - [`DataType`]: numeric sample encoding, with fixed tables for foreign
//!   type codes (unmapped codes resolve to "unknown" rather than failing)
//! - [`SampleRate`]: sample rate in hertz
//! - [`Unit`]: physical unit of the samples
//!
//! All lookup tables are immutable constants; lookups return tagged results
//! (`Option` for foreign codes, `Result<_, ValueError>` for user input).

mod channel_type;
mod data_type;
mod error;
mod quantity;

#[cfg(test)]
mod tests;

pub use channel_type::{ChannelType, ALL_CHANNEL_TYPES, CHANNEL_TYPE_ALIASES};
pub use data_type::DataType;
pub use error::ValueError;
pub use quantity::{SampleRate, Unit};
