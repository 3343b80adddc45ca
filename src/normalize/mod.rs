//! Normalization of scientific values into JSON
//!
//! Catalog results mix plain scalars with numeric arrays and masked arrays.
//! [`Datum`] is the closed set of value shapes the rest of the crate builds,
//! and [`normalize`] turns any of them into a [`serde_json::Value`] made only
//! of null, booleans, numbers, strings, lists and maps.
//!
//! Normalization is idempotent: feeding a normalized value back through
//! `Datum::from` and [`normalize`] yields the same JSON.

mod masked;

pub use masked::MaskedArray;

use ndarray::{ArrayD, ArrayViewD};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// A value on its way to the wire
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// A single invalid element
    Masked,
    /// Numeric array of any dimensionality
    Array(ArrayD<f64>),
    MaskedArray(MaskedArray),
    Seq(Vec<Datum>),
    Map(BTreeMap<String, Datum>),
}

impl Datum {
    /// Build a mapping from key/value pairs
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Datum)>,
    {
        Datum::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Convert a [`Datum`] into plain JSON
pub fn normalize(datum: &Datum) -> Value {
    match datum {
        Datum::Masked => Value::Null,
        Datum::MaskedArray(array) => array_value(array.data(), Some(array.mask())),
        Datum::Array(array) => array_value(array.view(), None),
        Datum::Float(v) => float_value(*v),
        Datum::Int(v) => Value::Number((*v).into()),
        Datum::UInt(v) => Value::Number((*v).into()),
        Datum::Map(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect::<Map<String, Value>>(),
        ),
        Datum::Seq(items) => Value::Array(items.iter().map(normalize).collect()),
        Datum::Null => Value::Null,
        Datum::Bool(b) => Value::Bool(*b),
        Datum::Str(s) => Value::String(s.clone()),
    }
}

/// Finite floats become numbers; NaN and infinities have no JSON form and
/// are treated as invalid elements
fn float_value(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Nested row-major lists, with masked elements as null
fn array_value(data: ArrayViewD<'_, f64>, mask: Option<ArrayViewD<'_, bool>>) -> Value {
    if data.ndim() == 0 {
        let masked = mask
            .as_ref()
            .and_then(|m| m.iter().next().copied())
            .unwrap_or(false);
        return match data.iter().next() {
            Some(&v) if !masked => float_value(v),
            _ => Value::Null,
        };
    }

    match mask {
        Some(mask) => Value::Array(
            data.outer_iter()
                .zip(mask.outer_iter())
                .map(|(d, m)| array_value(d, Some(m)))
                .collect(),
        ),
        None => Value::Array(data.outer_iter().map(|d| array_value(d, None)).collect()),
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Bool(b) => Datum::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Datum::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Datum::UInt(u)
                } else {
                    n.as_f64().map_or(Datum::Masked, Datum::Float)
                }
            }
            Value::String(s) => Datum::Str(s),
            Value::Array(items) => Datum::Seq(items.into_iter().map(Datum::from).collect()),
            Value::Object(map) => Datum::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Float(v)
    }
}

/// Missing values become masked scalars
impl From<Option<f64>> for Datum {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Datum::Masked, Datum::Float)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Str(v.to_string())
    }
}
