use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::ValueError;

// =========================================================================
// Sample rate
// =========================================================================

/// Frequency units accepted after a sample-rate magnitude, with their scale to Hz
const FREQUENCY_UNITS: &[(&str, f64)] = &[
    ("GHz", 1e9),
    ("MHz", 1e6),
    ("kHz", 1e3),
    ("mHz", 1e-3),
    ("Hz", 1.0),
    ("hz", 1.0),
];

/// Number of samples per second. The unit is always hertz.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SampleRate(f64);

impl SampleRate {
    /// Create a sample rate from a magnitude in hertz
    pub fn new(hz: f64) -> Result<Self, ValueError> {
        if !hz.is_finite() || hz < 0.0 {
            return Err(ValueError::InvalidSampleRate(hz.to_string()));
        }
        // fold -0.0 into 0.0 so equal rates hash equally
        Ok(Self(if hz == 0.0 { 0.0 } else { hz }))
    }

    /// Magnitude in hertz
    pub fn hz(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SampleRate {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SampleRate> for f64 {
    fn from(rate: SampleRate) -> Self {
        rate.0
    }
}

impl FromStr for SampleRate {
    type Err = ValueError;

    /// Parses `"16384"`, `"16384 Hz"`, `"16.384kHz"`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ValueError::InvalidSampleRate(s.to_string());

        let (magnitude, scale) = FREQUENCY_UNITS
            .iter()
            .find_map(|(unit, scale)| text.strip_suffix(unit).map(|m| (m.trim_end(), *scale)))
            .unwrap_or((text, 1.0));

        let value: f64 = magnitude.parse().map_err(|_| invalid())?;
        Self::new(value * scale).map_err(|_| invalid())
    }
}

impl PartialEq for SampleRate {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for SampleRate {}

impl Hash for SampleRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for SampleRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SampleRate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

// =========================================================================
// Physical unit
// =========================================================================

/// SI prefixes, longest first so `da` wins over `d`
const SI_PREFIXES: &[&str] = &[
    "da", "Y", "Z", "E", "P", "T", "G", "M", "k", "h", "d", "c", "m", "u", "µ", "n", "p", "f",
    "a", "z", "y",
];

/// Symbols that accept an SI prefix
const PREFIXABLE_SYMBOLS: &[&str] = &[
    "m", "g", "s", "A", "K", "mol", "cd", "Hz", "N", "Pa", "J", "W", "C", "V", "F", "Ohm", "S",
    "Wb", "T", "H", "rad", "sr", "L", "l", "bar", "eV", "Gal",
];

/// Symbols used verbatim
const PLAIN_SYMBOLS: &[&str] = &[
    "ct",
    "count",
    "counts",
    "strain",
    "dimensionless",
    "cycle",
    "cycles",
    "deg",
    "degC",
    "min",
    "h",
    "d",
    "yr",
    "dB",
    "%",
    "ppm",
    "torr",
    "Torr",
    "psi",
    "sec",
    "Ohms",
    "1",
];

/// Spellings servers use for "no unit"
const PLACEHOLDERS: &[&str] = &["undef", "undefined", "none", "n/a"];

/// Fractional powers: `^(1/2)`, `^(-3)`, `^0.5`
fn fractional_power() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\^(?:\(\s*-?\d+(?:\s*/\s*\d+)?\s*\)|-?\d+\.\d+)")
            .expect("fractional power pattern is valid")
    })
}

/// Physical unit of a channel's samples, validated against the unit grammar.
///
/// A unit is a product or quotient of symbols (separated by `*`, `/`, `.` or
/// whitespace), each optionally SI-prefixed and raised to a power: an integer
/// (`m^2`, `m**2` or `m2`), a parenthesised ratio (`Hz^(1/2)`) or a decimal
/// (`Hz**0.5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit(String);

impl Unit {
    /// Parse a unit string; empty input is rejected
    pub fn new(unit: &str) -> Result<Self, ValueError> {
        let text = unit.trim();
        if text.is_empty() || !is_valid_unit(text) {
            return Err(ValueError::InvalidUnit(unit.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    /// Parse a unit string where empty input or a placeholder such as
    /// `undef` or `none` means "no unit"
    pub fn parse_optional(unit: &str) -> Result<Option<Self>, ValueError> {
        let text = unit.trim();
        if text.is_empty() || PLACEHOLDERS.iter().any(|p| text.eq_ignore_ascii_case(p)) {
            Ok(None)
        } else {
            Self::new(unit).map(Some)
        }
    }

    /// The unit as written
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_unit(text: &str) -> bool {
    let normalized = text.replace("**", "^");
    let normalized = fractional_power().replace_all(&normalized, "^1");
    let mut seen = 0usize;
    for token in normalized
        .split(|c: char| matches!(c, '*' | '/' | '.' | '(' | ')') || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if !is_valid_token(token) {
            return false;
        }
        seen += 1;
    }
    seen > 0
}

fn is_valid_token(token: &str) -> bool {
    let symbol = strip_exponent(token);
    if symbol.is_empty() {
        return false;
    }
    if PLAIN_SYMBOLS.contains(&symbol) || PREFIXABLE_SYMBOLS.contains(&symbol) {
        return true;
    }
    SI_PREFIXES.iter().any(|prefix| {
        symbol
            .strip_prefix(prefix)
            .is_some_and(|base| PREFIXABLE_SYMBOLS.contains(&base))
    })
}

/// Remove a trailing `^n` or bare integer power from a symbol
fn strip_exponent(token: &str) -> &str {
    if let Some((symbol, power)) = token.split_once('^') {
        return if is_integer(power) { symbol } else { "" };
    }
    if token == "1" {
        return token;
    }
    let digits_start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '-')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    let (symbol, power) = token.split_at(digits_start);
    if power.is_empty() || is_integer(power) {
        symbol
    } else {
        ""
    }
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

impl FromStr for Unit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
