//! Line grammar of the availability tool output.
//!
//! The tool prints an optional `Requested source list:` preamble followed by
//! one line per requested channel, in request order:
//!
//! ```text
//! H1:LSC-DARM_ERR {H-H1_R:1126259000-1126260000 H-H1_T:1126259000-1126262000}
//! ```
//!
//! Each record is `<observatory>-<frame type>:<start>-<end>`.

use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::segments::{Segment, SegmentList};

use super::{AvailabilityError, AvailabilityReport, RequestedChannel};

const PREAMBLE: &str = "Requested source list:";
const TOOL_ERROR: &str = "Error in daq";

fn record_pattern() -> &'static Regex {
    static RECORD: OnceLock<Regex> = OnceLock::new();
    RECORD.get_or_init(|| {
        Regex::new(r"^(?P<obs>[A-Z])-(?P<type>\w+):(?P<start>\d+)-(?P<end>\d+)$")
            .expect("record pattern is a valid regex")
    })
}

/// Classification of one output line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Blank or preamble
    Skip,
    /// Error reported by the tool itself
    ToolError(&'a str),
    /// Availability of the next requested channel
    Channel(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() || line.starts_with(PREAMBLE) {
        Line::Skip
    } else if line.starts_with(TOOL_ERROR) {
        Line::ToolError(line)
    } else {
        Line::Channel(line)
    }
}

/// Parse the tool's standard output into a report.
///
/// Lines are matched to `requests` in order. Every request gets an entry,
/// even if the tool printed nothing for it; a channel requested twice keeps
/// the segments of its last line. Segments are clipped to `span`, dropped if
/// they fall outside it, and coalesced per storage type.
pub fn parse_availability(
    output: &str,
    requests: &[RequestedChannel],
    span: Segment,
) -> Result<AvailabilityReport, AvailabilityError> {
    let mut report = AvailabilityReport::new(span);
    for request in requests {
        report.ensure(request.channel());
    }

    let mut pending = requests.iter();

    for (index, line) in output.lines().enumerate() {
        let line_number = index + 1;
        let text = match classify(line) {
            Line::Skip => continue,
            Line::ToolError(message) => return Err(AvailabilityError::Tool(message.to_string())),
            Line::Channel(text) => text,
        };

        let request = pending.next().ok_or_else(|| {
            AvailabilityError::parse(line_number, line, "more lines than requested channels")
        })?;
        if !text.starts_with(request.base_name()) {
            return Err(AvailabilityError::parse(
                line_number,
                line,
                format!("expected a line for '{}'", request.base_name()),
            ));
        }

        let segments = parse_records(line_number, text, span)?;
        debug!(
            "{}: {} storage type(s) available",
            request.base_name(),
            segments.len()
        );
        report.insert(request.channel(), segments);
    }

    Ok(report)
}

/// Parse the records following the channel name on one line
fn parse_records(
    line_number: usize,
    line: &str,
    span: Segment,
) -> Result<BTreeMap<String, SegmentList>, AvailabilityError> {
    let (_, records) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| AvailabilityError::parse(line_number, line, "no availability records"))?;
    let records = records.trim().trim_matches(|c| c == '{' || c == '}');

    let mut segments: BTreeMap<String, SegmentList> = BTreeMap::new();

    for piece in records.split(' ').filter(|p| !p.is_empty()) {
        let caps = record_pattern().captures(piece).ok_or_else(|| {
            AvailabilityError::parse(line_number, line, format!("malformed record '{}'", piece))
        })?;

        let (Ok(start), Ok(end)) = (caps["start"].parse::<i64>(), caps["end"].parse::<i64>())
        else {
            debug!("skipping out-of-range record '{}'", piece);
            continue;
        };
        let segment = Segment::new(start, end);
        if !segment.is_ordered() {
            debug!("skipping reversed record '{}'", piece);
            continue;
        }
        let Some(clipped) = segment.intersect(&span) else {
            continue;
        };

        segments
            .entry(caps["type"].to_string())
            .or_default()
            .push(clipped);
    }

    for list in segments.values_mut() {
        list.coalesce();
    }
    Ok(segments)
}
