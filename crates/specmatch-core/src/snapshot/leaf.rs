//! Leaf descriptors: the terminal values of a flattened record.
//!
//! Kind names follow the numeric-width vocabulary used by Kubernetes API
//! objects (`int32`, `int64`, `float64`, ...) so that snapshot fixtures stay
//! readable next to the manifests they were taken from.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Runtime type tag of a leaf.
///
/// Compared before values as a cheap type-agreement check: an `int32`
/// replica count never equals an `int64` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Float32,
    Float64,
    Char,
    String,
    /// Opaque byte buffer, compared as a whole
    Bytes,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Int128 => "int128",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uint128 => "uint128",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Bytes => "bytes",
        }
    }

    fn is_signed(&self) -> bool {
        matches!(
            self,
            Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64 | Kind::Int128
        )
    }

    fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64 | Kind::Uint128
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar value held by a leaf.
///
/// Integers are widened to 128 bits; the original width lives in [`Kind`].
#[derive(Debug, Clone)]
pub enum LeafValue {
    Bool(bool),
    Int(i128),
    Uint(u128),
    Float(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
}

impl LeafValue {
    fn rank(&self) -> u8 {
        match self {
            LeafValue::Bool(_) => 0,
            LeafValue::Int(_) => 1,
            LeafValue::Uint(_) => 2,
            LeafValue::Float(_) => 3,
            LeafValue::Char(_) => 4,
            LeafValue::String(_) => 5,
            LeafValue::Bytes(_) => 6,
        }
    }

    /// Total order used to sort order-insensitive lists by their identity field.
    pub fn sort_cmp(&self, other: &LeafValue) -> Ordering {
        match (self, other) {
            (LeafValue::Bool(a), LeafValue::Bool(b)) => a.cmp(b),
            (LeafValue::Int(a), LeafValue::Int(b)) => a.cmp(b),
            (LeafValue::Uint(a), LeafValue::Uint(b)) => a.cmp(b),
            (LeafValue::Float(a), LeafValue::Float(b)) => a.total_cmp(b),
            (LeafValue::Char(a), LeafValue::Char(b)) => a.cmp(b),
            (LeafValue::String(a), LeafValue::String(b)) => a.cmp(b),
            (LeafValue::Bytes(a), LeafValue::Bytes(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Text form used when the value is a map key.
    pub(crate) fn as_key(&self) -> Option<String> {
        match self {
            LeafValue::Bool(v) => Some(v.to_string()),
            LeafValue::Int(v) => Some(v.to_string()),
            LeafValue::Uint(v) => Some(v.to_string()),
            LeafValue::Float(v) => Some(v.to_string()),
            LeafValue::Char(v) => Some(v.to_string()),
            LeafValue::String(v) => Some(v.clone()),
            LeafValue::Bytes(_) => None,
        }
    }

    /// Stable textual form fed into snapshot digests.
    ///
    /// Equal values (including `0.0`/`-0.0` and NaN/NaN) render identically.
    pub(crate) fn canonical_repr(&self) -> String {
        match self {
            LeafValue::Bool(v) => v.to_string(),
            LeafValue::Int(v) => v.to_string(),
            LeafValue::Uint(v) => v.to_string(),
            LeafValue::Float(v) if v.is_nan() => "NaN".to_string(),
            LeafValue::Float(v) if *v == 0.0 => "0".to_string(),
            LeafValue::Float(v) => format!("{:e}", v),
            LeafValue::Char(v) => format!("{:?}", v),
            LeafValue::String(v) => format!("{:?}", v),
            LeafValue::Bytes(v) => format!("{:?}", v),
        }
    }

    /// Rebuild a typed value from its JSON rendering and declared kind.
    pub fn from_json(kind: Kind, value: &Value) -> std::result::Result<Self, String> {
        let mismatch = || format!("value {} is not a valid {}", value, kind);
        match kind {
            Kind::Bool => value.as_bool().map(LeafValue::Bool).ok_or_else(mismatch),
            k if k.is_signed() => value
                .as_i64()
                .map(|v| LeafValue::Int(v as i128))
                .ok_or_else(mismatch),
            k if k.is_unsigned() => value
                .as_u64()
                .map(|v| LeafValue::Uint(v as u128))
                .ok_or_else(mismatch),
            Kind::Float32 | Kind::Float64 => match value {
                Value::Number(n) => n.as_f64().map(LeafValue::Float).ok_or_else(mismatch),
                // non-finite floats have no JSON number form
                Value::String(s) => s.parse::<f64>().map(LeafValue::Float).map_err(|_| mismatch()),
                _ => Err(mismatch()),
            },
            Kind::Char => {
                let s = value.as_str().ok_or_else(mismatch)?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(LeafValue::Char(c)),
                    _ => Err(mismatch()),
                }
            }
            Kind::String => value
                .as_str()
                .map(|s| LeafValue::String(s.to_string()))
                .ok_or_else(mismatch),
            Kind::Bytes => serde_json::from_value::<Vec<u8>>(value.clone())
                .map(LeafValue::Bytes)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        }
    }
}

/// Structural equality; NaN equals NaN so that every snapshot equals itself.
impl PartialEq for LeafValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LeafValue::Bool(a), LeafValue::Bool(b)) => a == b,
            (LeafValue::Int(a), LeafValue::Int(b)) => a == b,
            (LeafValue::Uint(a), LeafValue::Uint(b)) => a == b,
            (LeafValue::Float(a), LeafValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (LeafValue::Char(a), LeafValue::Char(b)) => a == b,
            (LeafValue::String(a), LeafValue::String(b)) => a == b,
            (LeafValue::Bytes(a), LeafValue::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafValue::Bool(v) => write!(f, "{}", v),
            LeafValue::Int(v) => write!(f, "{}", v),
            LeafValue::Uint(v) => write!(f, "{}", v),
            LeafValue::Float(v) => write!(f, "{}", v),
            LeafValue::Char(v) => write!(f, "{:?}", v),
            LeafValue::String(v) => write!(f, "{:?}", v),
            LeafValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl Serialize for LeafValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LeafValue::Bool(v) => serializer.serialize_bool(*v),
            LeafValue::Int(v) => match i64::try_from(*v) {
                Ok(v) => serializer.serialize_i64(v),
                Err(_) => serializer.serialize_i128(*v),
            },
            LeafValue::Uint(v) => match u64::try_from(*v) {
                Ok(v) => serializer.serialize_u64(v),
                Err(_) => serializer.serialize_u128(*v),
            },
            LeafValue::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            LeafValue::Float(v) => serializer.serialize_str(&v.to_string()),
            LeafValue::Char(v) => serializer.serialize_char(*v),
            LeafValue::String(v) => serializer.serialize_str(v),
            LeafValue::Bytes(v) => v.serialize(serializer),
        }
    }
}

/// One terminal value of a flattened record.
///
/// The canonical path is the key under which the leaf is stored in its
/// [`Snapshot`](super::Snapshot); `name` keeps the original-case path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLeaf")]
pub struct Leaf {
    pub name: String,
    pub value: LeafValue,
    pub kind: Kind,
}

impl Leaf {
    pub fn new(name: impl Into<String>, value: LeafValue, kind: Kind) -> Self {
        Self {
            name: name.into(),
            value,
            kind,
        }
    }

    /// Kind and value agree with `other`.
    pub fn matches(&self, other: &Leaf) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

/// Wire form of a leaf; accepts both the lower-case field names and the
/// capitalised `Name`/`Val`/`Kind` fixture layout.
#[derive(Deserialize)]
struct RawLeaf {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Val")]
    value: Value,
    #[serde(alias = "Kind")]
    kind: Kind,
}

impl TryFrom<RawLeaf> for Leaf {
    type Error = String;

    fn try_from(raw: RawLeaf) -> std::result::Result<Self, Self::Error> {
        let value = LeafValue::from_json(raw.kind, &raw.value)
            .map_err(|reason| format!("{}: {}", raw.name, reason))?;
        Ok(Leaf {
            name: raw.name,
            value,
            kind: raw.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_match_serde() {
        for kind in [Kind::Int32, Kind::Uint8, Kind::Float64, Kind::String, Kind::Bytes] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, json!(kind.as_str()));
        }
    }

    #[test]
    fn test_nan_equals_nan() {
        assert_eq!(LeafValue::Float(f64::NAN), LeafValue::Float(f64::NAN));
        assert_eq!(LeafValue::Float(0.0), LeafValue::Float(-0.0));
        assert_ne!(LeafValue::Float(1.0), LeafValue::Float(2.0));
    }

    #[test]
    fn test_variants_never_cross_compare() {
        assert_ne!(LeafValue::Int(1), LeafValue::Uint(1));
        assert_ne!(LeafValue::String("1".into()), LeafValue::Int(1));
    }

    #[test]
    fn test_sort_cmp_orders_strings_lexically() {
        let a = LeafValue::String("APOLLO_HOSTIP".into());
        let b = LeafValue::String("APOLLO_PODIP".into());
        assert_eq!(a.sort_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_deserialize_capitalised_fixture_entry() {
        let leaf: Leaf = serde_json::from_value(json!({
            "Name": "template.spec.volumes.0.configMap.defaultMode",
            "Val": 420,
            "Kind": "int32"
        }))
        .unwrap();
        assert_eq!(leaf.kind, Kind::Int32);
        assert_eq!(leaf.value, LeafValue::Int(420));
    }

    #[test]
    fn test_deserialize_rejects_kind_mismatch() {
        let result: std::result::Result<Leaf, _> = serde_json::from_value(json!({
            "name": "replicas",
            "value": "three",
            "kind": "int32"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_canonical_repr_collapses_signed_zero() {
        assert_eq!(
            LeafValue::Float(0.0).canonical_repr(),
            LeafValue::Float(-0.0).canonical_repr()
        );
    }
}
