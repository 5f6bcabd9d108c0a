use regex::Regex;

use crate::types::{ChannelType, DataType, Unit};

use super::{Channel, ChannelError};

/// Channel-name criterion of a [`Sieve`]
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// Regular-expression source, compiled when the sieve is applied
    Source(String),
    /// Pre-compiled expression
    Compiled(Regex),
}

impl NamePattern {
    /// Compile the pattern, anchoring it at both ends if `exact` is set.
    ///
    /// Anchoring a pre-compiled expression recompiles it from its source text,
    /// so options set through `RegexBuilder` are not carried over; use inline
    /// flags such as `(?i)` instead.
    fn compile(&self, exact: bool) -> Result<Regex, regex::Error> {
        match (self, exact) {
            (NamePattern::Compiled(re), false) => Ok(re.clone()),
            (NamePattern::Compiled(re), true) => Regex::new(&anchor(re.as_str())),
            (NamePattern::Source(src), false) => Regex::new(src),
            (NamePattern::Source(src), true) => Regex::new(&anchor(src)),
        }
    }
}

fn anchor(source: &str) -> String {
    format!(r"\A(?:{})\z", source)
}

impl From<&str> for NamePattern {
    fn from(source: &str) -> Self {
        NamePattern::Source(source.to_string())
    }
}

impl From<String> for NamePattern {
    fn from(source: String) -> Self {
        NamePattern::Source(source)
    }
}

impl From<Regex> for NamePattern {
    fn from(re: Regex) -> Self {
        NamePattern::Compiled(re)
    }
}

/// Equality criterion on a single channel attribute.
///
/// A channel passes only if it has the attribute set and the value is equal.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeFilter {
    /// Interferometer prefix
    Ifo(String),
    /// Instrumental system
    System(String),
    /// Instrumental sub-system
    Subsystem(String),
    /// Signal component
    Signal(String),
    /// Physical unit
    Unit(Unit),
    /// Numeric type
    DataType(DataType),
    /// Storage type
    ChannelType(ChannelType),
    /// Front-end model (compared case-insensitively, as models are stored lower-cased)
    Model(String),
    /// Source locator
    Url(String),
}

impl AttributeFilter {
    fn matches(&self, channel: &Channel) -> bool {
        match self {
            AttributeFilter::Ifo(v) => channel.ifo() == Some(v.as_str()),
            AttributeFilter::System(v) => channel.system() == Some(v.as_str()),
            AttributeFilter::Subsystem(v) => channel.subsystem() == Some(v.as_str()),
            AttributeFilter::Signal(v) => channel.signal() == Some(v.as_str()),
            AttributeFilter::Unit(v) => channel.unit() == Some(v),
            AttributeFilter::DataType(v) => channel.dtype() == Some(*v),
            AttributeFilter::ChannelType(v) => channel.channel_type() == Some(*v),
            AttributeFilter::Model(v) => channel.model() == Some(v.to_lowercase().as_str()),
            AttributeFilter::Url(v) => channel.url() == Some(v.as_str()),
        }
    }
}

/// Conjunction of optional channel criteria.
///
/// ```rust
/// use gwchannel::channel::{AttributeFilter, ChannelList, Sieve};
/// use gwchannel::types::ChannelType;
///
/// let list = ChannelList::from_names(["H1:LSC-DARM_ERR,online", "H1:LSC-DARM_CTRL", "L1:LSC-DARM_ERR"]);
/// let sieve = Sieve::new()
///     .name("DARM_ERR")
///     .attribute(AttributeFilter::ChannelType(ChannelType::Online));
/// let found = list.sieve(&sieve)?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name(), "H1:LSC-DARM_ERR");
/// # Ok::<(), gwchannel::channel::ChannelError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sieve {
    name: Option<NamePattern>,
    sample_rate: Option<f64>,
    sample_range: Option<(f64, f64)>,
    exact_match: bool,
    attributes: Vec<AttributeFilter>,
}

impl Sieve {
    /// An empty sieve, which keeps every channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep channels whose name contains a match for `pattern`
    pub fn name(mut self, pattern: impl Into<NamePattern>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    /// Require the name pattern to match the whole name
    pub fn exact_match(mut self, exact: bool) -> Self {
        self.exact_match = exact;
        self
    }

    /// Keep channels whose sample rate equals `hz`
    pub fn sample_rate(mut self, hz: f64) -> Self {
        self.sample_rate = Some(hz);
        self
    }

    /// Keep channels whose sample rate lies in `[low, high]`
    pub fn sample_range(mut self, low: f64, high: f64) -> Self {
        self.sample_range = Some((low, high));
        self
    }

    /// Add an attribute equality criterion
    pub fn attribute(mut self, filter: AttributeFilter) -> Self {
        self.attributes.push(filter);
        self
    }

    /// Apply the sieve, returning the matching channels in their original order
    pub(crate) fn apply<'a, I>(&self, channels: I) -> Result<Vec<Channel>, ChannelError>
    where
        I: IntoIterator<Item = &'a Channel>,
    {
        let name_re = self
            .name
            .as_ref()
            .map(|p| p.compile(self.exact_match))
            .transpose()?;

        Ok(channels
            .into_iter()
            .filter(|c| name_re.as_ref().map_or(true, |re| re.is_match(c.name())))
            .filter(|c| self.rate_matches(c))
            .filter(|c| self.attributes.iter().all(|a| a.matches(c)))
            .cloned()
            .collect())
    }

    fn rate_matches(&self, channel: &Channel) -> bool {
        if self.sample_rate.is_none() && self.sample_range.is_none() {
            return true;
        }
        let Some(rate) = channel.sample_rate().map(|r| r.hz()) else {
            return false;
        };
        if let Some(wanted) = self.sample_rate {
            if rate != wanted {
                return false;
            }
        }
        if let Some((low, high)) = self.sample_range {
            if rate < low || rate > high {
                return false;
            }
        }
        true
    }
}
