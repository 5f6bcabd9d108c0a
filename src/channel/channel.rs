use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::name::{parse_channel_name, split_type_suffix, ChannelNameParts};
use crate::services::{CatalogRecord, ForeignChannel};
use crate::types::{ChannelType, DataType, SampleRate, Unit, ValueError};

use super::ChannelError;

/// Representation of an interferometer data channel.
///
/// The `ifo`, `system`, `subsystem` and `signal` components are always derived
/// from [`name`](Self::name) and are recomputed by [`set_name`](Self::set_name).
///
/// Equality and hashing consider `(name, sample_rate, unit, url, type, dtype)`
/// only; `model` and the derived components are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ChannelRecord", into = "ChannelRecord")]
pub struct Channel {
    name: String,
    parts: ChannelNameParts,
    sample_rate: Option<SampleRate>,
    unit: Option<Unit>,
    dtype: Option<DataType>,
    channel_type: Option<ChannelType>,
    model: Option<String>,
    url: Option<String>,
}

impl Channel {
    /// Create a channel from a name, with every optional field unset.
    ///
    /// A trailing `,<type>` suffix naming a known storage type is split off
    /// and sets [`channel_type`](Self::channel_type).
    pub fn new(name: &str) -> Self {
        let mut channel = Self {
            name: String::new(),
            parts: ChannelNameParts::default(),
            sample_rate: None,
            unit: None,
            dtype: None,
            channel_type: None,
            model: None,
            url: None,
        };
        channel.set_name(name);
        channel
    }

    /// Start building a channel from a name
    pub fn builder(name: impl Into<String>) -> ChannelBuilder {
        ChannelBuilder::new(name)
    }

    /// Start building a channel that copies every field of `base` not
    /// explicitly overridden
    pub fn builder_from(base: &Channel) -> ChannelBuilder {
        ChannelBuilder::from_channel(base)
    }

    /// Build a channel from a discovery-protocol descriptor.
    ///
    /// Unknown type codes, unmapped data-type codes and unit strings outside
    /// the unit grammar leave the field unset.
    pub fn from_foreign(record: &ForeignChannel) -> Result<Self, ChannelError> {
        let channel_type = ChannelType::from_code(record.channel_type);
        if channel_type.is_none() {
            log::debug!(
                "unknown channel type code {} for {}",
                record.channel_type,
                record.name
            );
        }
        Channel::builder(record.name.as_str())
            .sample_rate(record.sample_rate)
            .maybe_unit(server_unit(&record.name, &record.signal_units))
            .maybe_dtype(DataType::from_discovery_code(record.data_type))
            .maybe_channel_type(channel_type)
            .build()
    }

    /// Build a channel from a channel-catalog record.
    ///
    /// Units outside the unit grammar leave the unit unset.
    pub fn from_catalog_record(record: &CatalogRecord) -> Result<Self, ChannelError> {
        let mut builder = Channel::builder(record.name.as_str())
            .maybe_dtype(record.datatype.and_then(DataType::from_catalog_code))
            .maybe_unit(
                record
                    .units
                    .as_deref()
                    .and_then(|unit| server_unit(&record.name, unit)),
            );
        if let Some(rate) = record.datarate {
            builder = builder.sample_rate(rate);
        }
        if let Some(model) = &record.source {
            builder = builder.model(model);
        }
        if let Some(url) = &record.displayurl {
            builder = builder.url(url);
        }
        builder.build()
    }

    // -------------------------------------------------------------------------
    // read-write properties

    /// Full channel name, following `IFO:SYSTEM-SUBSYSTEM_SIGNAL`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the channel and recompute the derived name components.
    ///
    /// A recognised `,<type>` suffix is stripped and sets the channel type;
    /// otherwise the type is left untouched.
    pub fn set_name(&mut self, name: &str) {
        let (name, suffix_type) = split_type_suffix(name);
        self.name = name.to_string();
        if suffix_type.is_some() {
            self.channel_type = suffix_type;
        }
        self.parts = parse_channel_name(&self.name);
    }

    /// Number of samples per second
    pub fn sample_rate(&self) -> Option<SampleRate> {
        self.sample_rate
    }

    /// Set the sample rate
    pub fn set_sample_rate(&mut self, rate: Option<SampleRate>) {
        self.sample_rate = rate;
    }

    /// Physical unit of the samples
    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    /// Set the physical unit
    pub fn set_unit(&mut self, unit: Option<Unit>) {
        self.unit = unit;
    }

    /// Numeric type of the samples
    pub fn dtype(&self) -> Option<DataType> {
        self.dtype
    }

    /// Set the numeric type
    pub fn set_dtype(&mut self, dtype: Option<DataType>) {
        self.dtype = dtype;
    }

    /// DAQ storage type; `None` means unspecified
    pub fn channel_type(&self) -> Option<ChannelType> {
        self.channel_type
    }

    /// Set the storage type
    pub fn set_channel_type(&mut self, channel_type: Option<ChannelType>) {
        self.channel_type = channel_type;
    }

    /// Front-end model producing this channel (always lower case)
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Set the front-end model; the name is stored lower-cased
    pub fn set_model(&mut self, model: Option<&str>) {
        self.model = model.map(str::to_lowercase);
    }

    /// Source locator (catalog URL)
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Set the source locator
    pub fn set_url(&mut self, url: Option<String>) {
        self.url = url;
    }

    // -------------------------------------------------------------------------
    // read-only properties

    /// Interferometer prefix
    pub fn ifo(&self) -> Option<&str> {
        self.parts.ifo.as_deref()
    }

    /// Instrumental system
    pub fn system(&self) -> Option<&str> {
        self.parts.system.as_deref()
    }

    /// Instrumental sub-system
    pub fn subsystem(&self) -> Option<&str> {
        self.parts.subsystem.as_deref()
    }

    /// Instrumental signal
    pub fn signal(&self) -> Option<&str> {
        self.parts.signal.as_deref()
    }

    /// All derived name components
    pub fn name_parts(&self) -> &ChannelNameParts {
        &self.parts
    }

    /// Name with underscores escaped for LaTeX rendering
    pub fn texname(&self) -> String {
        self.name.replace('_', r"\_")
    }

    /// Name as stored in the data-server database: `name,type` unless the
    /// type is unset, raw or reduced
    pub fn ndsname(&self) -> String {
        match self.channel_type {
            Some(t) if !t.is_unqualified() => format!("{},{}", self.name, t),
            _ => self.name.clone(),
        }
    }

    /// Discovery-protocol code of the storage type
    pub fn nds_type_code(&self) -> Option<u32> {
        self.channel_type.map(|t| t.code())
    }

    /// One-line `name (type, rate)` summary used in error messages
    pub fn describe(&self) -> String {
        format!(
            "{} ({}, {})",
            self.name,
            self.channel_type
                .map_or_else(|| "None".to_string(), |t| t.to_string()),
            self.sample_rate
                .map_or_else(|| "None".to_string(), |r| r.to_string())
        )
    }
}

/// Unit reported by a server, or `None` with a warning when it does not parse
fn server_unit(name: &str, unit: &str) -> Option<Unit> {
    match Unit::parse_optional(unit) {
        Ok(unit) => unit,
        Err(err) => {
            log::warn!("ignoring unit of {}: {}", name, err);
            None
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.sample_rate == other.sample_rate
            && self.unit == other.unit
            && self.url == other.url
            && self.channel_type == other.channel_type
            && self.dtype == other.dtype
    }
}

impl Eq for Channel {}

impl Hash for Channel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sample_rate.hash(state);
        self.unit.hash(state);
        self.url.hash(state);
        self.channel_type.hash(state);
        self.dtype.hash(state);
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        Channel::new(name)
    }
}

/// Serialized form of a [`Channel`]. The derived name components are written
/// out for readability but ignored when reading.
#[derive(Serialize, Deserialize)]
struct ChannelRecord {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ifo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subsystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signal: Option<String>,
    #[serde(default)]
    sample_rate: Option<SampleRate>,
    #[serde(default)]
    unit: Option<Unit>,
    #[serde(default)]
    dtype: Option<DataType>,
    #[serde(default, rename = "type")]
    channel_type: Option<ChannelType>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<ChannelRecord> for Channel {
    fn from(record: ChannelRecord) -> Self {
        let mut channel = Channel::new(&record.name);
        channel.sample_rate = record.sample_rate;
        channel.unit = record.unit;
        channel.dtype = record.dtype;
        if record.channel_type.is_some() {
            channel.channel_type = record.channel_type;
        }
        channel.set_model(record.model.as_deref());
        channel.url = record.url;
        channel
    }
}

impl From<Channel> for ChannelRecord {
    fn from(channel: Channel) -> Self {
        ChannelRecord {
            name: channel.name,
            ifo: channel.parts.ifo,
            system: channel.parts.system,
            subsystem: channel.parts.subsystem,
            signal: channel.parts.signal,
            sample_rate: channel.sample_rate,
            unit: channel.unit,
            dtype: channel.dtype,
            channel_type: channel.channel_type,
            model: channel.model,
            url: channel.url,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Channel`] supporting copy-with-overrides construction.
///
/// Setters taking text defer validation to [`build`](Self::build), which
/// reports the first invalid value.
///
/// ```rust
/// use gwchannel::channel::Channel;
///
/// let base = Channel::builder("H1:LSC-DARM_ERR")
///     .sample_rate(16384.0)
///     .parse_unit("counts")
///     .build()?;
///
/// let copy = Channel::builder_from(&base).parse_type("online").build()?;
/// assert_eq!(copy.name(), "H1:LSC-DARM_ERR");
/// assert_eq!(copy.sample_rate(), base.sample_rate());
/// assert_eq!(copy.ndsname(), "H1:LSC-DARM_ERR,online");
/// # Ok::<(), gwchannel::channel::ChannelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChannelBuilder {
    name: String,
    base: Option<Channel>,
    sample_rate: Option<Result<SampleRate, ValueError>>,
    unit: Option<Result<Unit, ValueError>>,
    dtype: Option<Result<DataType, ValueError>>,
    channel_type: Option<Result<ChannelType, ValueError>>,
    model: Option<String>,
    url: Option<String>,
}

impl ChannelBuilder {
    /// Builder for a channel called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            sample_rate: None,
            unit: None,
            dtype: None,
            channel_type: None,
            model: None,
            url: None,
        }
    }

    /// Builder copying `base`; the final name always comes from `base`
    pub fn from_channel(base: &Channel) -> Self {
        let mut builder = Self::new(base.name.clone());
        builder.base = Some(base.clone());
        builder
    }

    /// Sample rate in hertz
    pub fn sample_rate(mut self, hz: f64) -> Self {
        self.sample_rate = Some(SampleRate::new(hz));
        self
    }

    /// Sample rate from text such as `"256"` or `"16 kHz"`
    pub fn parse_sample_rate(mut self, rate: &str) -> Self {
        self.sample_rate = Some(rate.parse());
        self
    }

    /// Physical unit
    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(Ok(unit));
        self
    }

    /// Physical unit, if known
    pub fn maybe_unit(mut self, unit: Option<Unit>) -> Self {
        if let Some(unit) = unit {
            self.unit = Some(Ok(unit));
        }
        self
    }

    /// Physical unit from text; an empty string leaves the unit unset
    pub fn parse_unit(mut self, unit: &str) -> Self {
        self.unit = Unit::parse_optional(unit).transpose();
        self
    }

    /// Numeric sample type
    pub fn dtype(self, dtype: DataType) -> Self {
        self.maybe_dtype(Some(dtype))
    }

    /// Numeric sample type, if known
    pub fn maybe_dtype(mut self, dtype: Option<DataType>) -> Self {
        if let Some(dtype) = dtype {
            self.dtype = Some(Ok(dtype));
        }
        self
    }

    /// Numeric sample type from text such as `"float32"` or `"REAL8"`
    pub fn parse_dtype(mut self, dtype: &str) -> Self {
        self.dtype = Some(dtype.parse());
        self
    }

    /// Storage type
    pub fn channel_type(self, channel_type: ChannelType) -> Self {
        self.maybe_channel_type(Some(channel_type))
    }

    /// Storage type, if known
    pub fn maybe_channel_type(mut self, channel_type: Option<ChannelType>) -> Self {
        if let Some(channel_type) = channel_type {
            self.channel_type = Some(Ok(channel_type));
        }
        self
    }

    /// Storage type from an alias or protocol code (case-insensitive)
    pub fn parse_type(mut self, channel_type: &str) -> Self {
        self.channel_type = Some(channel_type.parse());
        self
    }

    /// Front-end model name
    pub fn model(mut self, model: &str) -> Self {
        if !model.is_empty() {
            self.model = Some(model.to_string());
        }
        self
    }

    /// Source locator
    pub fn url(mut self, url: &str) -> Self {
        if !url.is_empty() {
            self.url = Some(url.to_string());
        }
        self
    }

    /// Validate every pending value and assemble the channel
    pub fn build(self) -> Result<Channel, ChannelError> {
        let mut channel = match self.base {
            Some(base) => base,
            None => Channel::new(&self.name),
        };

        if let Some(rate) = self.sample_rate {
            channel.sample_rate = Some(rate?);
        }
        if let Some(unit) = self.unit {
            channel.unit = Some(unit?);
        }
        if let Some(dtype) = self.dtype {
            channel.dtype = Some(dtype?);
        }
        if let Some(channel_type) = self.channel_type {
            channel.channel_type = Some(channel_type?);
        }
        if let Some(model) = self.model {
            channel.set_model(Some(&model));
        }
        if let Some(url) = self.url {
            channel.url = Some(url);
        }

        Ok(channel)
    }
}
