use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::channel::Channel;
use crate::segments::{Segment, SegmentList};

/// How much of the requested span a channel covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// At least one storage type covers the whole span
    Complete,
    /// Some data, but no single storage type covers the whole span
    Partial,
    /// No data at all
    Unavailable,
}

/// Availability of a single channel, per storage type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAvailability {
    /// The requested channel
    pub channel: Channel,
    /// Coalesced segments keyed by storage (frame) type
    pub segments: BTreeMap<String, SegmentList>,
}

impl ChannelAvailability {
    fn coverage(&self, span: &Segment) -> Coverage {
        if self.segments.values().all(SegmentList::is_empty) {
            Coverage::Unavailable
        } else if self
            .segments
            .values()
            .any(|segs| segs.as_slice() == [*span])
        {
            Coverage::Complete
        } else {
            Coverage::Partial
        }
    }

    /// Seconds of data in the best-covered storage type
    pub fn livetime(&self) -> i64 {
        self.segments
            .values()
            .map(SegmentList::duration)
            .max()
            .unwrap_or(0)
    }
}

/// Data availability for a set of channels over one GPS span.
///
/// Entries keep the order in which channels were requested; every requested
/// channel has an entry, possibly with no segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    span: Segment,
    channels: Vec<ChannelAvailability>,
}

impl AvailabilityReport {
    /// Empty report for `span`
    pub fn new(span: Segment) -> Self {
        Self {
            span,
            channels: Vec::new(),
        }
    }

    /// The requested GPS span
    pub fn span(&self) -> Segment {
        self.span
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if no channels were requested
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Iterate over the per-channel entries in request order
    pub fn iter(&self) -> std::slice::Iter<'_, ChannelAvailability> {
        self.channels.iter()
    }

    /// Segments per storage type for `channel`
    pub fn get(&self, channel: &Channel) -> Option<&BTreeMap<String, SegmentList>> {
        self.channels
            .iter()
            .find(|entry| &entry.channel == channel)
            .map(|entry| &entry.segments)
    }

    /// Segments per storage type for the first channel called `name`
    pub fn get_by_name(&self, name: &str) -> Option<&BTreeMap<String, SegmentList>> {
        self.channels
            .iter()
            .find(|entry| entry.channel.name() == name)
            .map(|entry| &entry.segments)
    }

    /// Add an empty entry for `channel` unless it already has one
    pub(crate) fn ensure(&mut self, channel: Channel) {
        if self.get(&channel).is_none() {
            self.channels.push(ChannelAvailability {
                channel,
                segments: BTreeMap::new(),
            });
        }
    }

    /// Set the segments of `channel`, replacing any earlier ones
    pub(crate) fn insert(&mut self, channel: Channel, segments: BTreeMap<String, SegmentList>) {
        match self.channels.iter_mut().find(|entry| entry.channel == channel) {
            Some(entry) => entry.segments = segments,
            None => self.channels.push(ChannelAvailability { channel, segments }),
        }
    }

    fn count(&self, coverage: Coverage) -> usize {
        self.channels
            .iter()
            .filter(|entry| entry.coverage(&self.span) == coverage)
            .count()
    }

    /// Number of channels with complete coverage of the span
    pub fn complete_count(&self) -> usize {
        self.count(Coverage::Complete)
    }

    /// Number of channels with some data but gaps
    pub fn partial_count(&self) -> usize {
        self.count(Coverage::Partial)
    }

    /// Number of channels with no data in the span
    pub fn unavailable_count(&self) -> usize {
        self.count(Coverage::Unavailable)
    }

    /// Coverage of `channel`, if it is in the report
    pub fn coverage(&self, channel: &Channel) -> Option<Coverage> {
        self.channels
            .iter()
            .find(|entry| &entry.channel == channel)
            .map(|entry| entry.coverage(&self.span))
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static PARTIAL: Emoji<'_, '_> = Emoji("⚠", "[PARTIAL]");
            static NONE: Emoji<'_, '_> = Emoji("✗", "[NONE]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Data Availability Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("========================").cyan()));
            output.push_str(&format!(
                "{}: {} ({} s)\n\n",
                style("Span").bold(),
                self.span,
                self.span.duration()
            ));

            for entry in &self.channels {
                let (symbol, color_fn): (_, fn(&str) -> console::StyledObject<&str>) =
                    match entry.coverage(&self.span) {
                        Coverage::Complete => (OK, |s| style(s).green()),
                        Coverage::Partial => (PARTIAL, |s| style(s).yellow()),
                        Coverage::Unavailable => (NONE, |s| style(s).red()),
                    };

                output.push_str(&format!(
                    "[{}] {} ({} s)\n",
                    symbol,
                    color_fn(entry.channel.name()),
                    entry.livetime()
                ));
                for (frame_type, segments) in &entry.segments {
                    output.push_str(&format!(
                        "    {}: {}\n",
                        style(frame_type).bold(),
                        segments
                    ));
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} complete, {} partial, {} unavailable\n",
                style("Summary").bold(),
                style(self.complete_count()).green(),
                style(self.partial_count()).yellow(),
                style(self.unavailable_count()).red()
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data Availability Report")?;
        writeln!(f, "========================")?;
        writeln!(f, "Span: {} ({} s)", self.span, self.span.duration())?;
        writeln!(f)?;

        for entry in &self.channels {
            let symbol = match entry.coverage(&self.span) {
                Coverage::Complete => "✓",
                Coverage::Partial => "⚠",
                Coverage::Unavailable => "✗",
            };
            writeln!(
                f,
                "[{}] {} ({} s)",
                symbol,
                entry.channel.name(),
                entry.livetime()
            )?;
            for (frame_type, segments) in &entry.segments {
                writeln!(f, "    {}: {}", frame_type, segments)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} complete, {} partial, {} unavailable",
            self.complete_count(),
            self.partial_count(),
            self.unavailable_count()
        )
    }
}

impl<'a> IntoIterator for &'a AvailabilityReport {
    type Item = &'a ChannelAvailability;
    type IntoIter = std::slice::Iter<'a, ChannelAvailability>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}
