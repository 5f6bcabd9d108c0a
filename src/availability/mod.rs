//! # Data availability
//!
//! Reports when data for a set of channels can be retrieved from a data
//! server, by storage (frame) type, over a GPS span.
//!
//! Availability is obtained from an external query tool
//! (`nds2_channel_source` by default, see [`AvailabilityConfig`]) which is run
//! once per query through a [`ToolRunner`]. Its output is parsed by
//! [`parse_availability`] into an [`AvailabilityReport`].
//!
//! ## Request tokens
//!
//! Each channel is passed to the tool by name. When a [`Channel`] carries a
//! sample rate, `%<rate>` (the rate in Hz as an integer) is appended so the
//! tool can tell apart channels recorded at several rates. A raw name string
//! is passed through unchanged.
//!
//! ## Example
//!
//! ```rust
//! use gwchannel::availability::{AvailabilityConfig, AvailabilityResolver, ToolCommand,
//!     ToolOutput, ToolRunner, AvailabilityError};
//!
//! struct Canned;
//!
//! impl ToolRunner for Canned {
//!     fn run(&self, _: &ToolCommand) -> Result<ToolOutput, AvailabilityError> {
//!         Ok(ToolOutput::success("H1:LSC-DARM_ERR {H-H1_R:1000-2000}\n"))
//!     }
//! }
//!
//! let resolver = AvailabilityResolver::with_runner(AvailabilityConfig::default(), Canned);
//! let report = resolver.query(["H1:LSC-DARM_ERR"], 1500i64, 3000i64, "nds.example.org", None)?;
//! let segments = &report.get_by_name("H1:LSC-DARM_ERR").unwrap()["H1_R"];
//! assert_eq!(segments.to_string(), "[1500-2000]");
//! # Ok::<(), AvailabilityError>(())
//! ```

mod error;
mod parser;
mod report;
mod tool;


use log::{debug, warn};

use crate::channel::{Channel, ChannelList};
use crate::segments::Segment;
use crate::time::ToGps;

pub use error::AvailabilityError;
pub use parser::parse_availability;
pub use report::{AvailabilityReport, ChannelAvailability, Coverage};
pub use tool::{
    AvailabilityConfig, SystemRunner, ToolCommand, ToolOutput, ToolRunner, DEFAULT_PROGRAM,
};

/// A channel to query availability for
#[derive(Debug, Clone, PartialEq)]
pub enum RequestedChannel {
    /// A channel record; its name and sample rate form the request token
    Channel(Channel),
    /// A name string passed to the tool verbatim
    Name(String),
}

impl RequestedChannel {
    /// Token passed to the tool on the command line
    pub fn token(&self) -> String {
        match self {
            RequestedChannel::Channel(channel) => match channel.sample_rate() {
                Some(rate) => format!("{}%{}", channel.name(), rate.hz().trunc() as i64),
                None => channel.name().to_string(),
            },
            RequestedChannel::Name(name) => name.clone(),
        }
    }

    /// Text the tool echoes at the start of this request's output line
    pub fn base_name(&self) -> &str {
        match self {
            RequestedChannel::Channel(channel) => channel.name(),
            RequestedChannel::Name(name) => name.split('%').next().unwrap_or(name),
        }
    }

    /// Channel under which this request is reported.
    ///
    /// For a name string with a `%<rate>` suffix the rate is kept on the
    /// channel when it is a valid sample rate.
    pub fn channel(&self) -> Channel {
        match self {
            RequestedChannel::Channel(channel) => channel.clone(),
            RequestedChannel::Name(name) => {
                let mut channel = Channel::new(self.base_name());
                if let Some((_, rate)) = name.split_once('%') {
                    channel.set_sample_rate(rate.parse().ok());
                }
                channel
            }
        }
    }
}

impl From<Channel> for RequestedChannel {
    fn from(channel: Channel) -> Self {
        RequestedChannel::Channel(channel)
    }
}

impl From<&Channel> for RequestedChannel {
    fn from(channel: &Channel) -> Self {
        RequestedChannel::Channel(channel.clone())
    }
}

impl From<&str> for RequestedChannel {
    fn from(name: &str) -> Self {
        RequestedChannel::Name(name.to_string())
    }
}

impl From<String> for RequestedChannel {
    fn from(name: String) -> Self {
        RequestedChannel::Name(name)
    }
}

/// Runs availability queries with a given tool configuration
#[derive(Debug, Clone, Default)]
pub struct AvailabilityResolver<R = SystemRunner> {
    config: AvailabilityConfig,
    runner: R,
}

impl AvailabilityResolver<SystemRunner> {
    /// Resolver running the configured tool as a child process
    pub fn new(config: AvailabilityConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ToolRunner> AvailabilityResolver<R> {
    /// Resolver running the tool through `runner`
    pub fn with_runner(config: AvailabilityConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// The tool configuration
    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    /// Query when data for `channels` are available between `start` and
    /// `end` on the server `host`.
    ///
    /// An empty request list yields an empty report without running the
    /// tool. A request with an empty name is rejected before the tool runs.
    /// No partial report is returned on failure.
    pub fn query<I, T>(
        &self,
        channels: I,
        start: impl ToGps,
        end: impl ToGps,
        host: &str,
        port: Option<u16>,
    ) -> Result<AvailabilityReport, AvailabilityError>
    where
        I: IntoIterator<Item = T>,
        T: Into<RequestedChannel>,
    {
        let requests: Vec<RequestedChannel> = channels.into_iter().map(Into::into).collect();
        let span = Segment::new(start.to_gps()?, end.to_gps()?);

        if requests.is_empty() {
            debug!("no channels requested, skipping availability query");
            return Ok(AvailabilityReport::new(span));
        }
        if let Some(position) = requests
            .iter()
            .position(|request| request.base_name().trim().is_empty())
        {
            return Err(AvailabilityError::EmptyName { position });
        }

        let tokens: Vec<String> = requests.iter().map(RequestedChannel::token).collect();
        let command = self.config.command(span.start, host, port, &tokens);
        let output = self.runner.run(&command)?;

        if !output.is_success() {
            warn!("{}", output.stderr.trim_end());
            return Err(AvailabilityError::ToolInvocation {
                command: command.to_string(),
                code: output.code,
                stderr: output.stderr,
            });
        }

        parse_availability(&output.stdout, &requests, span)
    }
}

/// Query availability with the default tool configuration
pub fn query_availability<I, T>(
    channels: I,
    start: impl ToGps,
    end: impl ToGps,
    host: &str,
    port: Option<u16>,
) -> Result<AvailabilityReport, AvailabilityError>
where
    I: IntoIterator<Item = T>,
    T: Into<RequestedChannel>,
{
    AvailabilityResolver::new(AvailabilityConfig::default()).query(channels, start, end, host, port)
}

impl ChannelList {
    /// Query availability of every channel in the list with the default
    /// tool configuration.
    ///
    /// See [`AvailabilityResolver::query`].
    pub fn query_availability(
        &self,
        start: impl ToGps,
        end: impl ToGps,
        host: &str,
        port: Option<u16>,
    ) -> Result<AvailabilityReport, AvailabilityError> {
        query_availability(self, start, end, host, port)
    }
}
