use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar request parameter value.
///
/// The gateway signs the textual form of every parameter, so `Display` here
/// is a wire contract shared with the server-side verifier. Integers render
/// in base-10 with no decimal point; decimals render in minimal form
/// (`1.50` -> `"1.5"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Decimal(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d.normalize()),
        }
    }
}

// Decimals go over the wire in the same textual form that was signed; the
// other scalars keep their native JSON types.
impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Decimal(d) => serializer.serialize_str(&d.normalize().to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// Request parameters keyed by name.
///
/// A `BTreeMap` keeps the keys in ascending lexicographic order, which is the
/// order the signature canonicalization requires, independent of how the
/// caller inserted them.
pub type ParamSet = BTreeMap<String, ParamValue>;

/// The signed request body sent to the gateway.
///
/// `params` is dropped from the serialized form entirely when empty; the
/// signature is still computed over the (empty) canonical form beforehand.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub project: u64,
    pub timestamp: u64,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamSet>,
    pub sign: String,
}

/// Outer wire wrapper: `{"request": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct SignedRequest {
    pub request: RequestEnvelope,
}
