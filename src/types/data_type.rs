use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValueError;

/// Numeric encoding of a channel's samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
    /// Complex of two 32-bit floats
    Complex64,
}

/// Discovery-protocol data type codes. Codes absent here (e.g. unsigned
/// 32-bit, code 64) resolve to an unknown dtype.
const DISCOVERY_CODES: &[(u32, DataType)] = &[
    (1, DataType::Int16),
    (2, DataType::Int32),
    (4, DataType::Int64),
    (8, DataType::Float32),
    (16, DataType::Float64),
    (32, DataType::Complex64),
];

/// DAQ data type codes as reported by the channel information catalog
const CATALOG_CODES: &[(u32, DataType)] = &[
    (1, DataType::Int16),
    (2, DataType::Int32),
    (3, DataType::Int64),
    (4, DataType::Float32),
    (5, DataType::Float64),
    (6, DataType::Complex64),
];

/// Lower-case textual names, including the LAL type-code names
const NAMES: &[(&str, DataType)] = &[
    ("int16", DataType::Int16),
    ("int32", DataType::Int32),
    ("int64", DataType::Int64),
    ("float32", DataType::Float32),
    ("float64", DataType::Float64),
    ("complex64", DataType::Complex64),
    ("int2", DataType::Int16),
    ("int4", DataType::Int32),
    ("int8", DataType::Int64),
    ("real4", DataType::Float32),
    ("real8", DataType::Float64),
    ("complex8", DataType::Complex64),
    ("double", DataType::Float64),
];

impl DataType {
    /// Canonical lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Complex64 => "complex64",
        }
    }

    /// Map a discovery-protocol code; `None` when the code has no mapping
    pub fn from_discovery_code(code: u32) -> Option<Self> {
        lookup(DISCOVERY_CODES, code)
    }

    /// Map a catalog (DAQ) code; `None` when the code has no mapping
    pub fn from_catalog_code(code: u32) -> Option<Self> {
        lookup(CATALOG_CODES, code)
    }
}

fn lookup(table: &[(u32, DataType)], code: u32) -> Option<DataType> {
    table.iter().find(|(c, _)| *c == code).map(|(_, t)| *t)
}

impl FromStr for DataType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, t)| *t)
            .ok_or_else(|| ValueError::InvalidDataType(s.to_string()))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
