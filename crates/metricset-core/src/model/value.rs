//! Sample values.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Scalar value of one sample.
///
/// Integers and floats are kept apart so that `2.0` and `2` render back the
/// way they were written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(i) => i as f64,
            Value::Float(f) => f,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) if v.is_nan() => f.write_str("NaN"),
            Value::Float(v) if v.is_infinite() => {
                f.write_str(if v > 0.0 { "+Inf" } else { "-Inf" })
            }
            // Debug keeps the decimal point (`2.0`) and is the shortest exact form.
            Value::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// Error for a sample value token that is neither an integer nor a float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue(pub String);

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid sample value: {}", self.0)
    }
}

impl std::error::Error for InvalidValue {}

impl FromStr for Value {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NaN" => return Ok(Value::Float(f64::NAN)),
            "+Inf" | "Inf" => return Ok(Value::Float(f64::INFINITY)),
            "-Inf" => return Ok(Value::Float(f64::NEG_INFINITY)),
            _ => {}
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Value::Int(i));
        }
        // Reject words like `inf`/`nan` that `f64::from_str` would accept.
        if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
            return Err(InvalidValue(s.to_string()));
        }
        s.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| InvalidValue(s.to_string()))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}
