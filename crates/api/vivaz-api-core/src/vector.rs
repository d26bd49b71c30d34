//! Vectors with optional axes.
//!
//! An axis that is `None` is absent, not zero: arithmetic and interpolation
//! leave it absent.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Vector {
    pub fn new(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self { x, y, z }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(Some(x), Some(y), None)
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Some(x), Some(y), Some(z))
    }

    /// Present axes in x, y, z order.
    pub fn axes(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [("x", self.x), ("y", self.y), ("z", self.z)]
            .into_iter()
            .filter_map(|(name, v)| v.map(|v| (name, v)))
    }

    /// Add `offset` to every present axis.
    pub fn offset_by(self, offset: f64) -> Self {
        Self {
            x: self.x.map(|v| v + offset),
            y: self.y.map(|v| v + offset),
            z: self.z.map(|v| v + offset),
        }
    }
}
