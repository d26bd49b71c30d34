//! Vivaz Dynamic Core (engine-agnostic)
//!
//! Per-frame evaluation of dynamic attribute values. A [`Schema`] stores
//! attributes (plain values, nested schemas or [`Variable`]s); a `Variable`
//! turns a compact configuration into a [`Calculator`] that maps an
//! evaluation [`Method`] over a stop list, and adds optional noise jitter.
//! Time, randomness and noise come from the [`Host`].

pub mod calculator;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod method;
pub mod noise;
pub mod ranges;
pub mod request;
pub mod schema;
pub mod variable;

// Re-exports for consumers (hosts and adapters)
pub use calculator::{Calculator, Target};
pub use config::Config;
pub use context::ExecutionContext;
pub use error::{EvalError, SchemaError};
pub use host::{Host, ManualHost, SystemHost};
pub use method::{Method, MethodParseError};
pub use noise::NoiseSampler;
pub use ranges::{RangeRegistry, Stop};
pub use request::{MapRequest, SourceTarget};
pub use schema::{Attr, AttrDefault, AttributeConfig, Constraint, ImportError, Schema};
pub use variable::Variable;
pub use vivaz_api_core::{Color, Value, ValueKind, Vector};
