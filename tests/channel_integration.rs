//! Integration tests for channel parsing, filtering and resolution
//!
//! These exercise the public API end to end, with the in-memory service
//! implementations standing in for the channel catalog and data server.

use gwchannel::channel::{AttributeFilter, Channel, ChannelError, ChannelList, Sieve};
use gwchannel::name::parse_channel_name;
use gwchannel::services::{ForeignChannel, StaticDiscovery, StaticDiscoveryFactory};
use gwchannel::types::{ChannelType, DataType};
use tempfile::tempdir;

fn server_table() -> Vec<ForeignChannel> {
    let record = |name: &str, rate: f64, channel_type: ChannelType, data_type: u32| {
        ForeignChannel {
            name: name.to_string(),
            sample_rate: rate,
            signal_units: "counts".to_string(),
            channel_type: channel_type.code(),
            data_type,
        }
    };
    vec![
        record("H1:LSC-DARM_ERR", 16384.0, ChannelType::Raw, 8),
        record("H1:LSC-DARM_ERR", 1.0, ChannelType::STrend, 16),
        record("H1:LSC-DARM_ERR", 1.0 / 60.0, ChannelType::MTrend, 16),
        record("H1:LSC-DARM_CTRL", 16384.0, ChannelType::Raw, 8),
        record("L1:PSL-ISS_PDA_OUT_DQ", 16384.0, ChannelType::Online, 8),
        record("L1:PSL-ISS_PDA_OUT_DQ", 256.0, ChannelType::Online, 8),
    ]
}

#[test]
fn test_name_components() {
    let parts = parse_channel_name("H1:SYS-SUB_SIG");
    assert_eq!(parts.ifo.as_deref(), Some("H1"));
    assert_eq!(parts.system.as_deref(), Some("SYS"));
    assert_eq!(parts.subsystem.as_deref(), Some("SUB"));
    assert_eq!(parts.signal.as_deref(), Some("SIG"));

    let parts = parse_channel_name("SYS");
    assert_eq!(parts.ifo, None);
    assert_eq!(parts.system.as_deref(), Some("SYS"));
    assert_eq!(parts.subsystem, None);
    assert_eq!(parts.signal, None);

    assert_eq!(parse_channel_name(""), Default::default());
}

#[test]
fn test_resolve_then_filter() {
    let factory = StaticDiscoveryFactory::new(server_table());
    let all = ChannelList::query_batch_at(
        ["H1:LSC-DARM_*", "L1:PSL-ISS_PDA_OUT_DQ"],
        &factory,
        "nds.example.org",
        Some(31200),
        None,
        false,
    )
    .unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(
        all.ifos().into_iter().collect::<Vec<_>>(),
        vec!["H1".to_string(), "L1".to_string()]
    );

    let trends = all
        .sieve(&Sieve::new().name("DARM_ERR").sample_range(0.0, 1.0))
        .unwrap();
    assert_eq!(trends.len(), 2);
    assert!(trends
        .iter()
        .all(|c| c.dtype() == Some(DataType::Float64)));

    let raw = all
        .sieve(&Sieve::new().attribute(AttributeFilter::ChannelType(ChannelType::Raw)))
        .unwrap();
    assert_eq!(raw.names(), vec!["H1:LSC-DARM_ERR", "H1:LSC-DARM_CTRL"]);
}

#[test]
fn test_unique_resolution() {
    let mut conn = StaticDiscovery::new(server_table());

    // several storage types: ambiguous without a type
    let err = Channel::query_unique("H1:LSC-DARM_ERR", &mut conn, None).unwrap_err();
    assert!(matches!(err, ChannelError::Ambiguous { .. }));
    let message = err.to_string();
    assert!(message.contains("H1:LSC-DARM_ERR (raw, 16384 Hz)"));
    assert!(message.contains("H1:LSC-DARM_ERR (s-trend, 1 Hz)"));

    // a type suffix disambiguates
    let trend = Channel::query_unique("H1:LSC-DARM_ERR,s-trend", &mut conn, None).unwrap();
    assert_eq!(trend.ndsname(), "H1:LSC-DARM_ERR,s-trend");

    // one identity at two rates: the first one wins
    let iss = Channel::query_unique("L1:PSL-ISS_PDA_OUT_DQ", &mut conn, None).unwrap();
    assert_eq!(iss.sample_rate().map(|r| r.hz()), Some(16384.0));

    let err = Channel::query_unique("V1:NOT-THERE", &mut conn, None).unwrap_err();
    assert!(matches!(err, ChannelError::NotFound(_)));
}

#[test]
fn test_channel_list_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("channels.json");

    let list = ChannelList::from_names(["H1:LSC-DARM_ERR,m-trend, L1:PSL-ISS_PDA_OUT_DQ"]);
    std::fs::write(&path, list.to_json().unwrap()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let back = ChannelList::from_json(&content).unwrap();
    assert_eq!(back, list);
    assert_eq!(back[0].channel_type(), Some(ChannelType::MTrend));
    assert_eq!(back[1].ifo(), Some("L1"));
}

#[test]
fn test_invalid_json_is_reported() {
    assert!(matches!(
        ChannelList::from_json("{not json"),
        Err(ChannelError::Json(_))
    ));
    assert!(ChannelList::from_json(r#"[{"name": "X1:A-B", "sample_rate": -1.0}]"#).is_err());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn channel_name() -> impl Strategy<Value = String> {
        "([A-Z][0-9]:)?[A-Z]{2,4}(-[A-Z0-9]{1,6}(_[A-Z0-9_]{1,10})?)?"
    }

    fn channel_list() -> impl Strategy<Value = ChannelList> {
        prop::collection::vec(
            (
                channel_name(),
                prop::option::of(prop::sample::select(vec![1.0, 16.0, 256.0, 16384.0])),
                prop::option::of(prop::sample::select(vec![
                    ChannelType::Raw,
                    ChannelType::Online,
                    ChannelType::STrend,
                ])),
            ),
            0..30,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .map(|(name, rate, channel_type)| {
                    let mut builder = Channel::builder(name).maybe_channel_type(channel_type);
                    if let Some(rate) = rate {
                        builder = builder.sample_rate(rate);
                    }
                    builder.build().unwrap()
                })
                .collect()
        })
    }

    fn sieve() -> impl Strategy<Value = Sieve> {
        (
            prop::option::of(prop::sample::select(vec!["H1", "^L", "DARM", "_[0-9]", "A|B"])),
            any::<bool>(),
            prop::option::of(prop::sample::select(vec![1.0, 256.0])),
            prop::option::of(prop::sample::select(vec!["H1", "L1"])),
        )
            .prop_map(|(pattern, exact, rate, ifo)| {
                let mut sieve = Sieve::new().exact_match(exact);
                if let Some(pattern) = pattern {
                    sieve = sieve.name(pattern);
                }
                if let Some(rate) = rate {
                    sieve = sieve.sample_range(rate, 16384.0);
                }
                if let Some(ifo) = ifo {
                    sieve = sieve.attribute(AttributeFilter::Ifo(ifo.to_string()));
                }
                sieve
            })
    }

    proptest! {
        /// Rebuilding a channel from its name keeps the name and components
        #[test]
        fn test_name_reconstruction(name in channel_name()) {
            let channel = Channel::new(&name);
            let rebuilt = Channel::new(&channel.to_string());
            prop_assert_eq!(rebuilt.name(), name.as_str());
            prop_assert_eq!(rebuilt.name_parts(), channel.name_parts());
        }

        /// Sieving leaves the receiver untouched
        #[test]
        fn test_sieve_does_not_mutate(list in channel_list(), sieve in sieve()) {
            let before = list.clone();
            let _ = list.sieve(&sieve).unwrap();
            prop_assert_eq!(list.names(), before.names());
            prop_assert_eq!(list, before);
        }

        /// Sieving twice with the same criteria changes nothing more
        #[test]
        fn test_sieve_idempotent(list in channel_list(), sieve in sieve()) {
            let once = list.sieve(&sieve).unwrap();
            let twice = once.sieve(&sieve).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
