//! Value: runtime instances produced by stores and dynamic variables.
//! All numeric types use f64 so millisecond clocks keep their precision.

use serde::{Deserialize, Serialize};

use crate::{Color, Vector};

/// Coarse kind of a [`Value`], used to pick an interpolation rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Bool,
    Text,
    Color,
    Vector,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar number
    Number(f64),

    /// Boolean (never interpolated)
    Bool(bool),

    /// Text; also used to name ranges and evaluation methods
    Text(String),

    /// RGBA color carrying its mode marker
    Color(Color),

    /// Vector with optional x/y/z axes
    Vector(Vector),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Color(_) => ValueKind::Color,
            Value::Vector(_) => ValueKind::Vector,
        }
    }

    #[inline]
    pub fn is_color(&self) -> bool {
        matches!(self, Value::Color(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Add `offset` to the numeric content of the value.
    ///
    /// Numbers are shifted arithmetically and vectors on every present axis.
    /// Colors, booleans and text are returned unchanged.
    pub fn offset_by(self, offset: f64) -> Value {
        match self {
            Value::Number(n) => Value::Number(n + offset),
            Value::Vector(v) => Value::Vector(v.offset_by(offset)),
            other => other,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Self {
        Value::Vector(v)
    }
}
