#![no_main]

use gwchannel::availability::{parse_availability, RequestedChannel};
use gwchannel::segments::Segment;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let output = String::from_utf8_lossy(data);
    let requests: Vec<RequestedChannel> = vec!["H1:A-B".into(), "L1:C-D%256".into()];
    let span = Segment::new(1_000_000_000, 1_000_010_000);

    // Untrusted tool output must produce a report or an error, never a panic
    if let Ok(report) = parse_availability(&output, &requests, span) {
        assert_eq!(report.len(), requests.len());
        for entry in &report {
            for segments in entry.segments.values() {
                for pair in segments.as_slice().windows(2) {
                    assert!(pair[0].end < pair[1].start);
                }
                for seg in segments {
                    assert!(span.start <= seg.start && seg.end <= span.end);
                }
            }
        }
    }
});
