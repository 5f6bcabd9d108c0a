//! Integration tests running the availability resolver against a real
//! subprocess.
//!
//! A small shell script stands in for the query tool: it echoes its arguments
//! on a preamble line and then prints fixed records for every request.

#![cfg(unix)]

use gwchannel::availability::{
    AvailabilityConfig, AvailabilityError, AvailabilityResolver, RequestedChannel,
};
use gwchannel::channel::{Channel, ChannelList};
use gwchannel::segments::{Segment, SegmentList};
use std::path::Path;
use tempfile::{tempdir, TempDir};

const FAKE_TOOL: &str = r#"#!/bin/sh
echo "Requested source list: $*"
# -a -s <start> -n <host>
shift 5
if [ "$1" = "-p" ]; then
    shift 2
fi
for token in "$@"; do
    name="${token%%%*}"
    echo "$name {H-H1_R:1000-1500 H-H1_R:1500-2000 H-H1_T:1800-5000}"
done
"#;

const FAILING_TOOL: &str = r#"#!/bin/sh
echo "daq_connect: no such server" >&2
exit 3
"#;

const ERROR_TOOL: &str = r#"#!/bin/sh
echo "Error in daq_recv_source_list: channel not found"
"#;

fn write_script(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

fn shell_config(script: &str) -> AvailabilityConfig {
    AvailabilityConfig {
        program: script.to_string(),
        launcher: vec!["sh".to_string()],
    }
}

#[test]
fn test_resolver_with_script() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir, "tool.sh", FAKE_TOOL);
    let resolver = AvailabilityResolver::new(shell_config(&script));

    let darm = Channel::builder("H1:LSC-DARM_ERR")
        .sample_rate(16384.0)
        .build()
        .unwrap();
    let requests: Vec<RequestedChannel> = vec![darm.clone().into(), "H1:LSC-DARM_CTRL".into()];

    let report = resolver
        .query(requests, 1200i64, 2500i64, "localhost", Some(31200))
        .unwrap();

    assert_eq!(report.len(), 2);
    let segments = report.get(&darm).unwrap();
    assert_eq!(
        segments["H1_R"],
        SegmentList::from(vec![Segment::new(1200, 2000)])
    );
    assert_eq!(
        segments["H1_T"],
        SegmentList::from(vec![Segment::new(1800, 2500)])
    );
    assert!(report.get_by_name("H1:LSC-DARM_CTRL").is_some());
}

#[test]
fn test_channel_list_with_script() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir, "tool.sh", FAKE_TOOL);
    let resolver = AvailabilityResolver::new(shell_config(&script));

    let list = ChannelList::from_names(["H1:A-B, H1:C-D"]);
    let report = resolver
        .query(&list, "1980-01-06 00:16:40", 1600i64, "localhost", None)
        .unwrap();
    assert_eq!(report.span(), Segment::new(1000, 1600));
    assert_eq!(report.complete_count(), 2);
}

#[test]
fn test_non_zero_exit_status() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir, "fail.sh", FAILING_TOOL);
    let resolver = AvailabilityResolver::new(shell_config(&script));

    let err = resolver
        .query(["H1:A-B"], 0i64, 10i64, "localhost", None)
        .unwrap_err();
    match err {
        AvailabilityError::ToolInvocation {
            command,
            code,
            stderr,
        } => {
            assert!(command.starts_with("sh "));
            assert!(command.ends_with("-a -s 0 -n localhost H1:A-B"));
            assert_eq!(code, Some(3));
            assert!(stderr.contains("no such server"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_tool_error_in_output() {
    let dir = tempdir().unwrap();
    let script = write_script(&dir, "error.sh", ERROR_TOOL);
    let resolver = AvailabilityResolver::new(shell_config(&script));

    let err = resolver
        .query(["H1:A-B"], 0i64, 10i64, "localhost", None)
        .unwrap_err();
    assert!(matches!(err, AvailabilityError::Tool(line) if line.starts_with("Error in daq")));
}

#[test]
fn test_missing_program() {
    let missing = Path::new("/nonexistent/gwchannel/channel_source");
    let resolver =
        AvailabilityResolver::new(AvailabilityConfig::with_program(missing.to_string_lossy()));

    let err = resolver
        .query(["H1:A-B"], 0i64, 10i64, "localhost", None)
        .unwrap_err();
    assert!(matches!(err, AvailabilityError::Spawn { .. }));
}
