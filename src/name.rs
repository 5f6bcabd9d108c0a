//! # Channel name grammar
//!
//! Channel names follow the convention
//!
//! ```text
//! [IFO:]SYSTEM[-SUBSYSTEM[_SIGNAL]][,TYPE]
//! ```
//!
//! where `IFO` is an uppercase letter followed by a digit (e.g. `H1`) and
//! `TYPE` is one of the storage-type aliases of
//! [`ChannelType`](crate::types::ChannelType).
//!
//! ```rust
//! use gwchannel::name::parse_channel_name;
//!
//! let parts = parse_channel_name("H1:LSC-DARM_ERR");
//! assert_eq!(parts.ifo.as_deref(), Some("H1"));
//! assert_eq!(parts.system.as_deref(), Some("LSC"));
//! assert_eq!(parts.subsystem.as_deref(), Some("DARM"));
//! assert_eq!(parts.signal.as_deref(), Some("ERR"));
//! ```

use serde::{Deserialize, Serialize};

use crate::types::ChannelType;

/// Structural components of a channel name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelNameParts {
    /// Interferometer prefix (e.g. `"H1"`)
    pub ifo: Option<String>,
    /// Instrumental system
    pub system: Option<String>,
    /// Instrumental sub-system
    pub subsystem: Option<String>,
    /// Signal name; may itself contain `-` or `_`
    pub signal: Option<String>,
}

/// Decompose a channel name into its components.
///
/// Never fails: names that don't follow the convention simply produce fewer
/// components.
pub fn parse_channel_name(name: &str) -> ChannelNameParts {
    if name.is_empty() {
        return ChannelNameParts::default();
    }

    let (ifo, rest) = match split_ifo(name) {
        Some((ifo, rest)) => (Some(ifo.to_string()), rest),
        None => (None, name),
    };

    let mut tags = rest.splitn(3, |c| c == '-' || c == '_').map(str::to_string);

    ChannelNameParts {
        ifo,
        system: tags.next(),
        subsystem: tags.next(),
        signal: tags.next(),
    }
}

/// Split a leading `[A-Z]\d:` prefix off a name
fn split_ifo(name: &str) -> Option<(&str, &str)> {
    let bytes = name.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_uppercase()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
    {
        Some((&name[..2], &name[3..]))
    } else {
        None
    }
}

/// Detect a trailing `,<type>` suffix.
///
/// The text is split on its last comma; if the trailing segment is a
/// recognised type alias the name and type are returned separately, otherwise
/// the whole text (comma included) is the name.
pub fn split_type_suffix(text: &str) -> (&str, Option<ChannelType>) {
    if let Some((name, suffix)) = text.rsplit_once(',') {
        if let Some(channel_type) = ChannelType::from_alias(suffix) {
            return (name, Some(channel_type));
        }
    }
    (text, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(ifo: Option<&str>, sys: Option<&str>, sub: Option<&str>, sig: Option<&str>) -> ChannelNameParts {
        ChannelNameParts {
            ifo: ifo.map(String::from),
            system: sys.map(String::from),
            subsystem: sub.map(String::from),
            signal: sig.map(String::from),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            parse_channel_name("H1:SYS-SUB_SIG"),
            parts(Some("H1"), Some("SYS"), Some("SUB"), Some("SIG"))
        );
    }

    #[test]
    fn test_system_only() {
        assert_eq!(parse_channel_name("SYS"), parts(None, Some("SYS"), None, None));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(parse_channel_name(""), ChannelNameParts::default());
    }

    #[test]
    fn test_signal_keeps_remaining_delimiters() {
        assert_eq!(
            parse_channel_name("L1:LSC-DARM_IN1_DQ"),
            parts(Some("L1"), Some("LSC"), Some("DARM"), Some("IN1_DQ"))
        );
        assert_eq!(
            parse_channel_name("GDS-CALIB-STRAIN-CLEAN"),
            parts(None, Some("GDS"), Some("CALIB"), Some("STRAIN-CLEAN"))
        );
    }

    #[test]
    fn test_delimiters_are_interchangeable() {
        assert_eq!(
            parse_channel_name("V1:A_B-C"),
            parts(Some("V1"), Some("A"), Some("B"), Some("C"))
        );
    }

    #[test]
    fn test_prefix_must_be_letter_digit_colon() {
        // lowercase and two-letter prefixes are not interferometers
        assert_eq!(parse_channel_name("h1:SYS").ifo, None);
        assert_eq!(parse_channel_name("H1:SYS").ifo.as_deref(), Some("H1"));
        assert_eq!(parse_channel_name("HX:SYS").ifo, None);
        assert_eq!(parse_channel_name("HX:SYS").system.as_deref(), Some("HX:SYS"));
    }

    #[test]
    fn test_type_suffix_detection() {
        assert_eq!(
            split_type_suffix("H1:A-B,m-trend"),
            ("H1:A-B", Some(ChannelType::MTrend))
        );
        assert_eq!(split_type_suffix("H1:A-B,RAW"), ("H1:A-B", Some(ChannelType::Raw)));
        assert_eq!(split_type_suffix("H1:A-B,mean"), ("H1:A-B,mean", None));
        assert_eq!(split_type_suffix("H1:A-B"), ("H1:A-B", None));
    }
}
