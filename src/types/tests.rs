use super::*;

#[test]
fn test_channel_type_alias_lookup_is_case_insensitive() {
    assert_eq!("M-TREND".parse::<ChannelType>().unwrap(), ChannelType::MTrend);
    assert_eq!("Raw".parse::<ChannelType>().unwrap(), ChannelType::Raw);
    assert_eq!("rds".parse::<ChannelType>().unwrap(), ChannelType::Reduced);
    assert_eq!(ChannelType::from_alias(" test-pt "), Some(ChannelType::TestPt));
}

#[test]
fn test_channel_type_numeric_codes() {
    for t in ALL_CHANNEL_TYPES {
        assert_eq!(ChannelType::from_code(t.code()), Some(t));
        assert_eq!(t.code().to_string().parse::<ChannelType>().unwrap(), t);
    }
    assert_eq!(ChannelType::from_code(3), None);
    // numeric codes are not aliases
    assert_eq!(ChannelType::from_alias("2"), None);
}

#[test]
fn test_channel_type_unknown_is_error() {
    let err = "bogus".parse::<ChannelType>().unwrap_err();
    assert_eq!(err, ValueError::InvalidChannelType("bogus".to_string()));
}

#[test]
fn test_channel_type_serde_uses_canonical_names() {
    let json = serde_json::to_string(&ChannelType::STrend).unwrap();
    assert_eq!(json, "\"s-trend\"");
    let back: ChannelType = serde_json::from_str("\"test-pt\"").unwrap();
    assert_eq!(back, ChannelType::TestPt);
}

#[test]
fn test_data_type_foreign_codes() {
    assert_eq!(DataType::from_discovery_code(1), Some(DataType::Int16));
    assert_eq!(DataType::from_discovery_code(32), Some(DataType::Complex64));
    // unsigned 32-bit has no counterpart
    assert_eq!(DataType::from_discovery_code(64), None);
    assert_eq!(DataType::from_catalog_code(4), Some(DataType::Float32));
    assert_eq!(DataType::from_catalog_code(99), None);
}

#[test]
fn test_data_type_names() {
    assert_eq!("float32".parse::<DataType>().unwrap(), DataType::Float32);
    assert_eq!("REAL8".parse::<DataType>().unwrap(), DataType::Float64);
    assert_eq!("COMPLEX8".parse::<DataType>().unwrap(), DataType::Complex64);
    assert!(matches!(
        "quaternion".parse::<DataType>(),
        Err(ValueError::InvalidDataType(_))
    ));
}

#[test]
fn test_sample_rate_parsing() {
    assert_eq!("16384".parse::<SampleRate>().unwrap().hz(), 16384.0);
    assert_eq!("16384 Hz".parse::<SampleRate>().unwrap().hz(), 16384.0);
    assert_eq!("16kHz".parse::<SampleRate>().unwrap().hz(), 16000.0);
    assert_eq!("0.0625".parse::<SampleRate>().unwrap().hz(), 0.0625);
    assert!("fast".parse::<SampleRate>().is_err());
    assert!("-1".parse::<SampleRate>().is_err());
    assert!(SampleRate::new(f64::NAN).is_err());
}

#[test]
fn test_sample_rate_equality_and_display() {
    let a = SampleRate::new(256.0).unwrap();
    let b: SampleRate = "256 Hz".parse().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "256 Hz");
    assert_eq!(SampleRate::new(-0.0).unwrap(), SampleRate::new(0.0).unwrap());
}

#[test]
fn test_unit_grammar_accepts_common_units() {
    for unit in [
        "m", "counts", "ct", "strain", "V", "um", "urad", "m/s", "m s^-1", "m**2", "W/m2",
        "kg*m/s^2", "degC", "µm", "Ohm", "(m/s)", "counts/sec", "Hz^(1/2)", "Hz**0.5",
        "m/s/Hz^(1/2)", "strain/Hz^(-1/2)", "V/Hz^0.5",
    ] {
        assert!(Unit::new(unit).is_ok(), "{unit} should be accepted");
    }
}

#[test]
fn test_unit_grammar_rejects_garbage() {
    for unit in ["", "   ", "furlongs", "m^x", "qV", "^2", "Hz^(1/x)", "Hz^()"] {
        assert!(
            matches!(Unit::new(unit), Err(ValueError::InvalidUnit(_))),
            "{unit:?} should be rejected"
        );
    }
    assert_eq!(Unit::parse_optional("").unwrap(), None);
}

#[test]
fn test_unit_placeholders_mean_no_unit() {
    for unit in ["undef", "UNDEF", "none", " None ", "undefined", "n/a"] {
        assert_eq!(Unit::parse_optional(unit).unwrap(), None, "{unit:?}");
    }
    assert!(Unit::new("none").is_err());
    assert_eq!(
        Unit::parse_optional("m/s").unwrap().map(String::from),
        Some("m/s".to_string())
    );
}
