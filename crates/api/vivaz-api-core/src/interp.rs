//! Interpolation helpers:
//! - remap (linear range mapping)
//! - number_value (remap between two weighted stops)
//! - color_value (per-channel RGB blend, alpha kept from the start color)
//! - vector_value (per-axis remap, only axes present on both ends)

use crate::{Color, Value, ValueKind, Vector};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `value` from `[from_low, from_high]` onto `[to_low, to_high]`.
///
/// No clamping is applied; callers guard `from_low == from_high`.
#[inline]
pub fn remap(value: f64, from_low: f64, from_high: f64, to_low: f64, to_high: f64) -> f64 {
    (value - from_low) / (from_high - from_low) * (to_high - to_low) + to_low
}

/// Interpolation rule selected for a stop list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InterpRule {
    Number,
    #[default]
    Color,
    Vector,
}

impl InterpRule {
    /// Rule implied by a value kind. Kinds without blending fall back to the
    /// number rule, which then fails soft on the mismatch.
    pub fn for_kind(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Color => InterpRule::Color,
            ValueKind::Vector => InterpRule::Vector,
            ValueKind::Number | ValueKind::Bool | ValueKind::Text => InterpRule::Number,
        }
    }

    /// Interpolate between stop `a` at `a_pos` and stop `b` at `b_pos` for the
    /// normalized position `pos`.
    ///
    /// Returns `None` when the values do not match the rule.
    pub fn apply(self, pos: f64, a_pos: f64, b_pos: f64, a: &Value, b: &Value) -> Option<Value> {
        match (self, a, b) {
            (InterpRule::Number, Value::Number(va), Value::Number(vb)) => {
                Some(Value::Number(number_value(pos, a_pos, b_pos, *va, *vb)))
            }
            (InterpRule::Color, Value::Color(ca), Value::Color(cb)) => {
                Some(Value::Color(color_value(pos, a_pos, b_pos, ca, cb)))
            }
            (InterpRule::Vector, Value::Vector(va), Value::Vector(vb)) => {
                Some(Value::Vector(vector_value(pos, a_pos, b_pos, va, vb)))
            }
            _ => None,
        }
    }
}

#[inline]
pub fn number_value(pos: f64, a_pos: f64, b_pos: f64, a: f64, b: f64) -> f64 {
    remap(pos, a_pos, b_pos, a, b)
}

pub fn color_value(pos: f64, a_pos: f64, b_pos: f64, a: &Color, b: &Color) -> Color {
    let t = (pos - a_pos) / (b_pos - a_pos);
    Color::rgba(
        lerp(a.red(), b.red(), t),
        lerp(a.green(), b.green(), t),
        lerp(a.blue(), b.blue(), t),
        a.alpha(),
    )
}

pub fn vector_value(pos: f64, a_pos: f64, b_pos: f64, a: &Vector, b: &Vector) -> Vector {
    let axis = |va: Option<f64>, vb: Option<f64>| match (va, vb) {
        (Some(va), Some(vb)) => Some(remap(pos, a_pos, b_pos, va, vb)),
        _ => None,
    };
    Vector {
        x: axis(a.x, b.x),
        y: axis(a.y, b.y),
        z: axis(a.z, b.z),
    }
}
