//! vivaz-api-core: value kinds and interpolation rules (core, engine-agnostic)

pub mod color;
pub mod interp;
pub mod json;
pub mod value;
pub mod vector;

pub use color::{Color, ColorMode};
pub use interp::{lerp, remap};
pub use value::{Value, ValueKind};
pub use vector::Vector;
