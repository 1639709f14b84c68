//! Transaction metadata codec.
//!
//! Cardano transactions can carry application metadata: a mapping from
//! unsigned-integer labels to values drawn from a small recursive schema
//! (integers, UTF-8 strings, bytestrings, lists, and maps whose keys may
//! themselves be composite values). On the wire the wallet API represents
//! each value as a one-key JSON object tagged with its type, e.g.
//! `{"int": 42}` or `{"map": [{"k": {"string": "a"}, "v": {"int": 1}}]}`.
//!
//! Metadata is stored on chain forever; strings and bytestrings are limited
//! to 64 bytes by the node (enforced server-side, not here). Integers cover
//! `-(2^64 - 1)` to `2^64 - 1` on chain; JSON numbers only reach
//! `i64::MIN..=u64::MAX`, so values beyond that range fail to encode rather
//! than losing precision.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Type tag for integer metadata values.
pub const TAG_INT: &str = "int";
/// Type tag for text metadata values.
pub const TAG_STRING: &str = "string";
/// Type tag for bytestring metadata values.
pub const TAG_BYTES: &str = "bytes";
/// Type tag for list metadata values.
pub const TAG_LIST: &str = "list";
/// Type tag for map metadata values.
pub const TAG_MAP: &str = "map";

/// Key slot of an encoded map pair.
pub const MAP_KEY: &str = "k";
/// Value slot of an encoded map pair.
pub const MAP_VALUE: &str = "v";

/// Errors produced by the metadata codec.
///
/// Every variant carries the path of the offending node, e.g. `/1/3/[k]`
/// for the key of the fourth pair of the map stored under label 1. A
/// failed decode or encode leaves no partial result behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// A payload had the wrong JSON type for its tag.
    #[error("{path}: expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },

    /// A tagged object or map pair did not have the required key shape.
    #[error("{path}: {detail}")]
    Shape { path: String, detail: String },

    /// The single key of a tagged object was not a known type tag.
    #[error("{path}: unknown metadata type tag '{tag}'")]
    UnknownTag { path: String, tag: String },

    /// A payload could not be converted (bad hex, integer out of the
    /// JSON-representable range).
    #[error("{path}: {detail}")]
    Encoding { path: String, detail: String },

    /// Two map pairs decoded to structurally equal keys.
    #[error("{path}: duplicate map key {key}")]
    DuplicateKey { path: String, key: String },

    /// A host value has no metadata representation (floats).
    #[error("{path}: cannot encode value of type {type_name}")]
    UnsupportedType {
        path: String,
        type_name: &'static str,
    },
}

/// One node of decoded transaction metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    /// Integer in the on-chain range `-(2^64 - 1)..=2^64 - 1`.
    Integer(i128),
    /// UTF-8 string.
    Text(String),
    /// Raw bytestring, hex-encoded in transit.
    Bytes(Vec<u8>),
    /// Ordered list of values.
    List(Vec<MetadataValue>),
    /// Ordered key-value pairs. Keys may be composite; pair order is
    /// preserved but only matters for duplicate detection.
    Map(Vec<(MetadataValue, MetadataValue)>),
}

impl MetadataValue {
    /// Decode a single tagged-JSON node at the given path.
    pub fn from_json(path: &str, raw: &Value) -> Result<MetadataValue, MetadataError> {
        let obj = raw.as_object().ok_or_else(|| MetadataError::TypeMismatch {
            path: path.to_string(),
            expected: "a tagged metadata object",
            found: preview(raw),
        })?;
        if obj.len() != 1 {
            return Err(MetadataError::Shape {
                path: path.to_string(),
                detail: format!("expected exactly one type tag, got {} keys", obj.len()),
            });
        }
        // Exactly one entry by the check above.
        let (tag, payload) = obj.iter().next().expect("one-key object");
        match tag.as_str() {
            TAG_INT => decode_int(path, payload),
            TAG_STRING => {
                let s = payload.as_str().ok_or_else(|| type_mismatch(path, "a string", payload))?;
                Ok(MetadataValue::Text(s.to_string()))
            }
            TAG_BYTES => {
                let s = payload.as_str().ok_or_else(|| type_mismatch(path, "a hex string", payload))?;
                let bytes = hex::decode(s).map_err(|e| MetadataError::Encoding {
                    path: path.to_string(),
                    detail: format!("invalid hex bytestring ({e}): {}", truncate(s)),
                })?;
                Ok(MetadataValue::Bytes(bytes))
            }
            TAG_LIST => {
                let items = payload.as_array().ok_or_else(|| type_mismatch(path, "an array", payload))?;
                let mut list = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    list.push(MetadataValue::from_json(&format!("{path}/{i}"), item)?);
                }
                Ok(MetadataValue::List(list))
            }
            TAG_MAP => {
                let items = payload.as_array().ok_or_else(|| type_mismatch(path, "an array of pairs", payload))?;
                decode_map(path, items)
            }
            other => Err(MetadataError::UnknownTag {
                path: path.to_string(),
                tag: other.to_string(),
            }),
        }
    }

    /// Encode this node back into its tagged-JSON form.
    ///
    /// Fails only when an [`MetadataValue::Integer`] falls outside the range
    /// a JSON number can carry.
    pub fn to_json(&self, path: &str) -> Result<Value, MetadataError> {
        match self {
            MetadataValue::Integer(v) => {
                let n = serde_json::Number::from_i128(*v).ok_or_else(|| MetadataError::Encoding {
                    path: path.to_string(),
                    detail: format!("integer {v} is outside the JSON-representable range"),
                })?;
                Ok(tagged(TAG_INT, Value::Number(n)))
            }
            MetadataValue::Text(s) => Ok(tagged(TAG_STRING, Value::String(s.clone()))),
            MetadataValue::Bytes(b) => Ok(tagged(TAG_BYTES, Value::String(hex::encode(b)))),
            MetadataValue::List(items) => {
                let mut encoded = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    encoded.push(item.to_json(&format!("{path}/{i}"))?);
                }
                Ok(tagged(TAG_LIST, Value::Array(encoded)))
            }
            MetadataValue::Map(pairs) => {
                let mut encoded = Vec::with_capacity(pairs.len());
                for (i, (key, value)) in pairs.iter().enumerate() {
                    let item_path = format!("{path}/{i}");
                    let mut pair = Map::with_capacity(2);
                    pair.insert(MAP_KEY.to_string(), key.to_json(&format!("{item_path}/[{MAP_KEY}]"))?);
                    pair.insert(MAP_VALUE.to_string(), value.to_json(&format!("{item_path}/[{MAP_VALUE}]"))?);
                    encoded.push(Value::Object(pair));
                }
                Ok(tagged(TAG_MAP, Value::Array(encoded)))
            }
        }
    }
}

fn tagged(tag: &str, payload: Value) -> Value {
    let mut obj = Map::with_capacity(1);
    obj.insert(tag.to_string(), payload);
    Value::Object(obj)
}

fn type_mismatch(path: &str, expected: &'static str, found: &Value) -> MetadataError {
    MetadataError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: preview(found),
    }
}

fn decode_int(path: &str, payload: &Value) -> Result<MetadataValue, MetadataError> {
    // as_i128 is None for floats, so 1.5 is rejected here rather than
    // silently truncated.
    let n = payload
        .as_number()
        .and_then(serde_json::Number::as_i128)
        .ok_or_else(|| type_mismatch(path, "an integer", payload))?;
    Ok(MetadataValue::Integer(n))
}

fn decode_map(path: &str, items: &[Value]) -> Result<MetadataValue, MetadataError> {
    let mut pairs: Vec<(MetadataValue, MetadataValue)> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{path}/{i}");
        let pair = item.as_object().ok_or_else(|| type_mismatch(&item_path, "a pair object", item))?;
        if pair.len() != 2 {
            return Err(MetadataError::Shape {
                path: item_path,
                detail: format!("expected a pair with keys '{MAP_KEY}' and '{MAP_VALUE}', got {} keys", pair.len()),
            });
        }
        let raw_key = pair.get(MAP_KEY).ok_or_else(|| MetadataError::Shape {
            path: item_path.clone(),
            detail: format!("missing key '{MAP_KEY}' in map pair"),
        })?;
        let raw_value = pair.get(MAP_VALUE).ok_or_else(|| MetadataError::Shape {
            path: item_path.clone(),
            detail: format!("missing key '{MAP_VALUE}' in map pair"),
        })?;
        let key = MetadataValue::from_json(&format!("{item_path}/[{MAP_KEY}]"), raw_key)?;
        let value = MetadataValue::from_json(&format!("{item_path}/[{MAP_VALUE}]"), raw_value)?;
        if pairs.iter().any(|(existing, _)| *existing == key) {
            return Err(MetadataError::DuplicateKey {
                path: item_path,
                key: format!("{key:?}"),
            });
        }
        pairs.push((key, value));
    }
    Ok(MetadataValue::Map(pairs))
}

/// Decoded transaction metadata: unsigned-integer labels to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(pub BTreeMap<u64, MetadataValue>);

impl Metadata {
    /// Decode the tagged-JSON wire form.
    ///
    /// The whole decode aborts on the first offending node; the error names
    /// its path.
    pub fn from_json(raw: &Value) -> Result<Metadata, MetadataError> {
        let obj = raw.as_object().ok_or_else(|| MetadataError::TypeMismatch {
            path: String::new(),
            expected: "a metadata object",
            found: preview(raw),
        })?;
        let mut result = BTreeMap::new();
        for (key, value) in obj {
            let label: u64 = key.parse().map_err(|_| MetadataError::TypeMismatch {
                path: format!("/{key}"),
                expected: "an unsigned integer label",
                found: preview(&Value::String(key.clone())),
            })?;
            result.insert(label, MetadataValue::from_json(&format!("/{label}"), value)?);
        }
        Ok(Metadata(result))
    }

    /// Encode back into the tagged-JSON wire form.
    pub fn to_json(&self) -> Result<Value, MetadataError> {
        let mut obj = Map::with_capacity(self.0.len());
        for (label, value) in &self.0 {
            obj.insert(label.to_string(), value.to_json(&format!("/{label}"))?);
        }
        Ok(Value::Object(obj))
    }

    /// Encode schema-less host values into metadata.
    ///
    /// Accepts anything [`PlainValue`] can hold; floats are rejected with
    /// [`MetadataError::UnsupportedType`] instead of rounding.
    pub fn encode<I>(entries: I) -> Result<Metadata, MetadataError>
    where
        I: IntoIterator<Item = (u64, PlainValue)>,
    {
        let mut result = BTreeMap::new();
        for (label, value) in entries {
            result.insert(label, value.into_metadata(&format!("/{label}"))?);
        }
        Ok(Metadata(result))
    }

    pub fn get(&self, label: u64) -> Option<&MetadataValue> {
        self.0.get(&label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.to_json().map_err(S::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Metadata::from_json(&value).map_err(D::Error::custom)
    }
}

/// A schema-less host value destined for metadata encoding.
///
/// This is the write-side counterpart of [`MetadataValue`]: it additionally
/// admits booleans (encoded as `{"int": 1}` / `{"int": 0}`; decoding never
/// yields a boolean back) and floats (which always fail to encode).
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Int(i128),
    Bool(bool),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<PlainValue>),
    Map(Vec<(PlainValue, PlainValue)>),
}

impl PlainValue {
    /// Build a list value.
    pub fn list<I: IntoIterator<Item = PlainValue>>(items: I) -> PlainValue {
        PlainValue::List(items.into_iter().collect())
    }

    /// Build a map value from key-value pairs.
    pub fn map<I: IntoIterator<Item = (PlainValue, PlainValue)>>(pairs: I) -> PlainValue {
        PlainValue::Map(pairs.into_iter().collect())
    }

    fn into_metadata(self, path: &str) -> Result<MetadataValue, MetadataError> {
        match self {
            PlainValue::Int(v) => Ok(MetadataValue::Integer(v)),
            PlainValue::Bool(v) => Ok(MetadataValue::Integer(i128::from(v))),
            PlainValue::Float(_) => Err(MetadataError::UnsupportedType {
                path: path.to_string(),
                type_name: "float",
            }),
            PlainValue::Text(s) => Ok(MetadataValue::Text(s)),
            PlainValue::Bytes(b) => Ok(MetadataValue::Bytes(b)),
            PlainValue::List(items) => {
                let mut converted = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    converted.push(item.into_metadata(&format!("{path}/{i}"))?);
                }
                Ok(MetadataValue::List(converted))
            }
            PlainValue::Map(pairs) => {
                let mut converted: Vec<(MetadataValue, MetadataValue)> = Vec::with_capacity(pairs.len());
                for (i, (key, value)) in pairs.into_iter().enumerate() {
                    let item_path = format!("{path}/{i}");
                    let key = key.into_metadata(&format!("{item_path}/[{MAP_KEY}]"))?;
                    let value = value.into_metadata(&format!("{item_path}/[{MAP_VALUE}]"))?;
                    if converted.iter().any(|(existing, _)| *existing == key) {
                        return Err(MetadataError::DuplicateKey {
                            path: item_path,
                            key: format!("{key:?}"),
                        });
                    }
                    converted.push((key, value));
                }
                Ok(MetadataValue::Map(converted))
            }
        }
    }
}

macro_rules! plain_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for PlainValue {
            fn from(v: $ty) -> PlainValue {
                PlainValue::Int(i128::from(v))
            }
        })*
    };
}

plain_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<bool> for PlainValue {
    fn from(v: bool) -> PlainValue {
        PlainValue::Bool(v)
    }
}

impl From<f32> for PlainValue {
    fn from(v: f32) -> PlainValue {
        PlainValue::Float(f64::from(v))
    }
}

impl From<f64> for PlainValue {
    fn from(v: f64) -> PlainValue {
        PlainValue::Float(v)
    }
}

impl From<&str> for PlainValue {
    fn from(v: &str) -> PlainValue {
        PlainValue::Text(v.to_string())
    }
}

impl From<String> for PlainValue {
    fn from(v: String) -> PlainValue {
        PlainValue::Text(v)
    }
}

impl From<Vec<u8>> for PlainValue {
    fn from(v: Vec<u8>) -> PlainValue {
        PlainValue::Bytes(v)
    }
}

impl From<&[u8]> for PlainValue {
    fn from(v: &[u8]) -> PlainValue {
        PlainValue::Bytes(v.to_vec())
    }
}

impl From<MetadataValue> for PlainValue {
    fn from(v: MetadataValue) -> PlainValue {
        match v {
            MetadataValue::Integer(i) => PlainValue::Int(i),
            MetadataValue::Text(s) => PlainValue::Text(s),
            MetadataValue::Bytes(b) => PlainValue::Bytes(b),
            MetadataValue::List(items) => PlainValue::List(items.into_iter().map(PlainValue::from).collect()),
            MetadataValue::Map(pairs) => PlainValue::Map(
                pairs
                    .into_iter()
                    .map(|(k, v)| (PlainValue::from(k), PlainValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Short single-line preview of a JSON value for error messages.
fn preview(value: &Value) -> String {
    truncate(&value.to_string())
}

fn truncate(s: &str) -> String {
    const MAX: usize = 40;
    if s.chars().count() <= MAX {
        s.to_string()
    } else {
        let cut: String = s.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
