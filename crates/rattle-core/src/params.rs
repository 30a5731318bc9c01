//! Field values passed across the host boundary.

use crate::compat::{BTreeMap, String, ToString};
use serde::{Deserialize, Serialize};

/// Build a [`NodeParams`] map from key-value pairs.
///
/// # Example
/// ```
/// use rattle_core::params;
///
/// let init = params! {
///     "frequency" => 440.0,
///     "type" => "square",
/// };
/// assert_eq!(init.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::NodeParams::new();
        $(
            map.insert($key.to_string(), $crate::ParamValue::from($value));
        )*
        map
    }};
}

/// Initial field values for a node, applied in key order.
pub type NodeParams = BTreeMap<String, ParamValue>;

/// A value written into (or read from) a node field.
///
/// Deserializes untagged so host payloads like `1`, `0.5`, `true` or
/// `"sine"` map directly onto a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ParamValue {
    /// Convert to f64 if possible
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Convert to f32 if possible
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|f| f as f32)
    }

    /// Convert to i64 if possible
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Convert to bool if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert to string slice if possible
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this value has the same variant as `other` (numbers count as one kind).
    pub fn same_kind(&self, other: &ParamValue) -> bool {
        match (self, other) {
            (Self::Bool(_), Self::Bool(_)) | (Self::String(_), Self::String(_)) => true,
            (a, b) => a.as_f64().is_some() && b.as_f64().is_some(),
        }
    }
}

impl core::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<f32> for ParamValue {
    fn from(f: f32) -> Self {
        Self::Float(f as f64)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
