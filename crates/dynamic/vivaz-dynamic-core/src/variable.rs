//! Dynamic values.
//!
//! A [`Variable`] keeps its configuration as plain attributes in a [`Schema`]
//! (so it exports and imports like any other node) and lazily derives a
//! [`Calculator`] and an [`ExecutionContext`] from them on the first `val`.
//! Every write drops both; the next `val` rebuilds them.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::{Map, Value as JsonValue};
use vivaz_api_core::{json, Value};

use crate::calculator::{self, Calculator, Target};
use crate::config::Config;
use crate::context::ExecutionContext;
use crate::error::{EvalError, SchemaError};
use crate::host::Host;
use crate::method::Method;
use crate::request::{MapRequest, SourceTarget};
use crate::schema::Schema;

pub const METHOD: &str = "method";
pub const VALUE: &str = "value";
pub const VALUE_FROM: &str = "valueFrom";
pub const VALUE_TO: &str = "valueTo";
pub const ORIGIN_FROM: &str = "originFrom";
pub const ORIGIN_TO: &str = "originTo";
pub const MODULATOR: &str = "modulator";
pub const NOISE_SPEED: &str = "noiseSpeed";
pub const NOISE_SCALE: &str = "noiseScale";

/// Attributes holding a single value; objects written here are parsed as
/// values, shorthands such as `{ "color": "#fff" }` included.
const VALUE_SLOTS: [&str; 5] = [VALUE, VALUE_FROM, VALUE_TO, ORIGIN_FROM, ORIGIN_TO];

/// True when `obj` reads as a variable descriptor: a `method` plus a
/// `value` or `valueFrom`.
pub fn is_descriptor(obj: &Map<String, JsonValue>) -> bool {
    obj.contains_key(METHOD) && (obj.contains_key(VALUE) || obj.contains_key(VALUE_FROM))
}

#[derive(Clone, Debug)]
pub struct Variable {
    schema: Schema,
    calculator: Option<Calculator>,
    context: Option<ExecutionContext>,
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl Variable {
    pub fn new() -> Self {
        Self::with_config(Arc::new(Config::default()))
    }

    pub fn with_config(config: Arc<Config>) -> Self {
        let name = config.variable_name.clone();
        let mut var = Self {
            schema: Schema::named_with_config(name, config),
            calculator: None,
            context: None,
        };
        var.reset();
        var
    }

    /// Variable configured from a descriptor object.
    pub fn from_descriptor(
        obj: &Map<String, JsonValue>,
        config: Arc<Config>,
    ) -> Result<Self, SchemaError> {
        let mut var = Self::with_config(config);
        var.define(obj)?;
        Ok(var)
    }

    pub fn key(&self) -> &str {
        self.schema.key()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn calculator(&self) -> Option<&Calculator> {
        self.calculator.as_ref()
    }

    pub fn context(&self) -> Option<&ExecutionContext> {
        self.context.as_ref()
    }

    /// Configured evaluation method. Unknown names fall back to `fixed`.
    pub fn method(&self) -> Method {
        match self.schema.scalar(METHOD) {
            Some(Value::Text(name)) => name.parse().unwrap_or_else(|e| {
                warn!("{}: {e}; using fixed", self.key());
                Method::Fixed
            }),
            _ => Method::Fixed,
        }
    }

    /// Configure from positional arguments (see [`MapRequest::parse`]).
    /// Always starts from a clean configuration.
    pub fn map(&mut self, args: &[Value]) -> &mut Self {
        match MapRequest::parse(args) {
            Some(request) => self.apply(request),
            None => {
                self.reset();
                self
            }
        }
    }

    /// Replace the configuration with `request`.
    pub fn apply(&mut self, request: MapRequest) -> &mut Self {
        self.reset();
        match request {
            MapRequest::Fixed(value) => {
                self.write(VALUE, value);
            }
            MapRequest::Method(method) => {
                self.write_method(method);
            }
            MapRequest::RangeByName {
                method,
                range,
                modulator,
            } => {
                self.write_method(method);
                self.write(VALUE, Value::Text(range));
                self.write_opt(MODULATOR, modulator);
            }
            MapRequest::RangeByBounds { method, from, to } => {
                self.write_method(method);
                self.write(VALUE_FROM, from);
                self.write(VALUE_TO, to);
            }
            MapRequest::TimeMapped {
                method,
                from,
                to,
                modulator,
            } => {
                self.write_method(method);
                self.write(VALUE_FROM, from);
                self.write(VALUE_TO, to);
                self.write(MODULATOR, modulator);
            }
            MapRequest::SourceMapped {
                method,
                origin_from,
                origin_to,
                target,
                modulator,
            } => {
                self.write_method(method);
                self.write(ORIGIN_FROM, origin_from);
                self.write(ORIGIN_TO, origin_to);
                match target {
                    SourceTarget::Range(name) => self.write(VALUE, Value::Text(name)),
                    SourceTarget::Bounds { from, to } => {
                        self.write(VALUE_FROM, from);
                        self.write(VALUE_TO, to);
                    }
                }
                self.write_opt(MODULATOR, modulator);
            }
        }
        self
    }

    /// Add noise jitter: `speed` is the sampler step, `scale` the largest
    /// offset added to the result.
    pub fn noise(&mut self, speed: f64, scale: f64) -> &mut Self {
        self.write(NOISE_SPEED, Value::Number(speed));
        self.write(NOISE_SCALE, Value::Number(scale));
        self
    }

    pub fn noise_default(&mut self) -> &mut Self {
        let (speed, scale) = {
            let cfg = self.schema.shared_config();
            (cfg.default_noise_speed, cfg.default_noise_scale)
        };
        self.noise(speed, scale)
    }

    /// Write attributes directly, e.g. from a descriptor.
    pub fn define(&mut self, attrs: &Map<String, JsonValue>) -> Result<&mut Self, SchemaError> {
        let written = self.define_attrs(attrs);
        self.invalidate();
        written?;
        Ok(self)
    }

    fn define_attrs(&mut self, attrs: &Map<String, JsonValue>) -> Result<(), SchemaError> {
        for (name, value) in attrs {
            match value {
                JsonValue::Object(_) if VALUE_SLOTS.contains(&name.as_str()) => {
                    let value = json::parse_value(value.clone())?;
                    self.schema.set(name.as_str(), value);
                }
                _ => self.schema.define_entry(name, value)?,
            }
        }
        Ok(())
    }

    /// Current value, building the calculator and context first if needed.
    pub fn val(&mut self, host: &mut dyn Host) -> Result<Option<Value>, EvalError> {
        if self.calculator.is_none() {
            let calc = self.build_calculator(&*host);
            self.calculator = Some(calc);
        }
        if self.context.is_none() {
            let ctx = self.build_context(host);
            self.context = Some(ctx);
        }
        let scale = self.number(NOISE_SCALE).filter(|s| *s != 0.0);

        let (Some(calc), Some(ctx)) = (&self.calculator, &mut self.context) else {
            return Ok(None);
        };
        let Some(value) = calc.calc(ctx, host)? else {
            return Ok(None);
        };
        match scale {
            Some(scale) if !value.is_color() => Ok(Some(value.offset_by(ctx.jitter(host) * scale))),
            _ => Ok(Some(value)),
        }
    }

    pub fn export(&self, indent: &str) -> Option<String> {
        self.schema.export(indent)
    }

    fn build_calculator(&self, host: &dyn Host) -> Calculator {
        let method = self.method();
        let source = (self.number(ORIGIN_FROM), self.number(ORIGIN_TO));
        let value = self.schema.scalar(VALUE);
        let bounds = (self.schema.scalar(VALUE_FROM), self.schema.scalar(VALUE_TO));

        let targets: Vec<Target> = match (value, bounds) {
            (Some(Value::Text(range)), _) if method != Method::Fixed => host
                .ranges()
                .lookup(range)
                .iter()
                .cloned()
                .map(Target::Stop)
                .collect(),
            (_, (Some(from), Some(to))) => {
                vec![Target::Bare(from.clone()), Target::Bare(to.clone())]
            }
            (_, (Some(one), None)) | (_, (None, Some(one))) => {
                debug!(
                    "{}: only one of {VALUE_FROM}/{VALUE_TO} is set; value is static",
                    self.key()
                );
                vec![Target::Bare(one.clone())]
            }
            (Some(v), (None, None)) => vec![Target::Bare(v.clone())],
            (None, (None, None)) => Vec::new(),
        };
        calculator::build(self.key(), method, source, targets)
    }

    fn build_context(&self, host: &mut dyn Host) -> ExecutionContext {
        let method = self.method();
        let modulator = self
            .number(MODULATOR)
            .filter(|m| m.is_finite() && *m != 0.0)
            .unwrap_or_else(|| method.default_modulator());
        let jitter_speed = self.number(NOISE_SPEED).filter(|s| *s != 0.0);
        ExecutionContext::new(
            self.key(),
            modulator,
            jitter_speed,
            self.schema.shared_config(),
            host,
        )
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.schema.scalar(name).and_then(Value::as_number)
    }

    fn write(&mut self, name: &str, value: Value) {
        self.schema.set(name, value);
        self.invalidate();
    }

    fn write_opt(&mut self, name: &str, value: Option<Value>) {
        if let Some(value) = value {
            self.write(name, value);
        }
    }

    fn write_method(&mut self, method: Method) {
        self.write(METHOD, Value::Text(method.name().to_string()));
    }

    fn invalidate(&mut self) {
        self.calculator = None;
        self.context = None;
    }

    fn reset(&mut self) {
        self.schema.clear();
        self.write_method(Method::Fixed);
    }
}
