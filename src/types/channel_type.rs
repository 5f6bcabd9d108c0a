use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValueError;

/// DAQ storage type of a channel, as understood by the discovery protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelType {
    /// Minute trend
    MTrend,
    /// Online (real-time) data
    Online,
    /// Full-rate raw frames
    Raw,
    /// Reduced data set
    Reduced,
    /// Second trend
    STrend,
    /// Static (slow, non-sampled) data
    Static,
    /// Front-end test point
    TestPt,
}

/// Canonical types in alias-scan order
pub const ALL_CHANNEL_TYPES: [ChannelType; 7] = [
    ChannelType::MTrend,
    ChannelType::Online,
    ChannelType::Raw,
    ChannelType::Reduced,
    ChannelType::STrend,
    ChannelType::Static,
    ChannelType::TestPt,
];

/// Lower-case aliases accepted for each type, canonical names first.
///
/// The order of this table is also the order in which
/// [`ChannelList::from_names`](crate::channel::ChannelList::from_names)
/// scans for `,<alias>` suffixes.
pub const CHANNEL_TYPE_ALIASES: &[(&str, ChannelType)] = &[
    ("m-trend", ChannelType::MTrend),
    ("online", ChannelType::Online),
    ("raw", ChannelType::Raw),
    ("reduced", ChannelType::Reduced),
    ("s-trend", ChannelType::STrend),
    ("static", ChannelType::Static),
    ("test-pt", ChannelType::TestPt),
    ("rds", ChannelType::Reduced),
    ("test-point", ChannelType::TestPt),
    ("testpoint", ChannelType::TestPt),
];

impl ChannelType {
    /// Canonical lower-case name (e.g. `"s-trend"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::MTrend => "m-trend",
            ChannelType::Online => "online",
            ChannelType::Raw => "raw",
            ChannelType::Reduced => "reduced",
            ChannelType::STrend => "s-trend",
            ChannelType::Static => "static",
            ChannelType::TestPt => "test-pt",
        }
    }

    /// Numeric code used by the discovery protocol
    pub fn code(&self) -> u32 {
        match self {
            ChannelType::Online => 1,
            ChannelType::Raw => 2,
            ChannelType::Reduced => 4,
            ChannelType::STrend => 8,
            ChannelType::MTrend => 16,
            ChannelType::TestPt => 32,
            ChannelType::Static => 64,
        }
    }

    /// Map a discovery-protocol code back to a type
    pub fn from_code(code: u32) -> Option<Self> {
        ALL_CHANNEL_TYPES.iter().copied().find(|t| t.code() == code)
    }

    /// Case-insensitive lookup in the textual alias table only
    pub fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.trim().to_ascii_lowercase();
        CHANNEL_TYPE_ALIASES
            .iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, t)| *t)
    }

    /// True for the types whose names are not qualified in `ndsname`
    pub fn is_unqualified(&self) -> bool {
        matches!(self, ChannelType::Raw | ChannelType::Reduced)
    }
}

impl FromStr for ChannelType {
    type Err = ValueError;

    /// Accepts any alias (case-insensitive) or a decimal protocol code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = Self::from_alias(s) {
            return Ok(t);
        }
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| ValueError::InvalidChannelType(s.to_string()))
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
