//! Interpolation engine.
//!
//! A calculator either holds a static value or an ordered stop list. `calc`
//! evaluates the configured method, maps the raw position out of the source
//! range and samples the stops.

use log::{debug, warn};
use vivaz_api_core::interp::InterpRule;
use vivaz_api_core::{remap, Value};

use crate::context::ExecutionContext;
use crate::error::EvalError;
use crate::host::Host;
use crate::method::Method;
use crate::ranges::Stop;

/// Argument of [`Calculator::to`]: a bare value or an explicit stop.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Bare(Value),
    Stop(Stop),
}

impl From<Value> for Target {
    fn from(v: Value) -> Self {
        Target::Bare(v)
    }
}

impl From<Stop> for Target {
    fn from(s: Stop) -> Self {
        Target::Stop(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    static_value: Option<Value>,
    stops: Vec<Stop>,
    method: Method,
    source_low: f64,
    source_high: f64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            static_value: None,
            stops: Vec::new(),
            method: Method::Fixed,
            source_low: 0.0,
            source_high: 1.0,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the method and source range (defaults 0.0 / 1.0).
    pub fn from(&mut self, method: Method, low: Option<f64>, high: Option<f64>) -> &mut Self {
        self.method = method;
        self.source_low = low.unwrap_or(0.0);
        self.source_high = high.unwrap_or(1.0);
        self
    }

    /// Add destination targets. Stops accumulate across calls.
    ///
    /// One bare target fixes a static value (and also records implicit stops
    /// at 0 and 1). Several bare targets are spread evenly over [0, 1].
    /// Explicit stops are kept as given and clear the static value.
    pub fn to<I, T>(&mut self, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        let targets: Vec<Target> = targets.into_iter().map(Into::into).collect();
        let n = targets.len();
        if n == 1 {
            if let Some(Target::Bare(v)) = targets.first() {
                self.static_value = Some(v.clone());
                self.stops.push(Stop::new(0.0, v.clone()));
                self.stops.push(Stop::new(1.0, v.clone()));
                return self;
            }
        }
        for (i, target) in targets.into_iter().enumerate() {
            match target {
                Target::Stop(stop) => {
                    self.static_value = None;
                    self.stops.push(stop);
                }
                Target::Bare(value) => {
                    let position = i as f64 / (n - 1) as f64;
                    self.stops.push(Stop::new(position, value));
                }
            }
        }
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn static_value(&self) -> Option<&Value> {
        self.static_value.as_ref()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn source_range(&self) -> (f64, f64) {
        (self.source_low, self.source_high)
    }

    /// Current value for the context.
    pub fn calc(
        &self,
        ctx: &mut ExecutionContext,
        host: &mut dyn Host,
    ) -> Result<Option<Value>, EvalError> {
        if let Some(v) = &self.static_value {
            return Ok(Some(v.clone()));
        }
        let Some(raw) = self.method.evaluate(ctx, host)? else {
            return Ok(self.stops.first().map(|s| s.value.clone()));
        };
        Ok(self.sample(self.normalize(raw)))
    }

    fn normalize(&self, raw: f64) -> f64 {
        if self.source_low == 0.0 && self.source_high == 1.0 {
            return raw;
        }
        if self.source_low == self.source_high {
            warn!(
                "degenerate source range [{}, {}]; using position 0",
                self.source_low, self.source_high
            );
            return 0.0;
        }
        remap(raw, self.source_low, self.source_high, 0.0, 1.0)
    }

    /// Sample the stop list at normalized position `pos`.
    pub fn sample(&self, pos: f64) -> Option<Value> {
        let mut ini: (f64, Option<&Value>) = (0.0, None);
        let mut fin: (f64, Option<&Value>) = (1.0, None);
        let mut rule = InterpRule::default();

        for stop in self.stops.iter().rev() {
            if stop.position == pos {
                return Some(stop.value.clone());
            }
            if stop.position >= ini.0 && stop.position < pos {
                ini = (stop.position, Some(&stop.value));
            }
            if stop.position <= fin.0 && stop.position > pos {
                fin = (stop.position, Some(&stop.value));
            }
            if !stop.value.is_color() {
                rule = InterpRule::for_kind(stop.value.kind());
            }
        }

        match (ini, fin) {
            ((_, None), (_, None)) => None,
            ((_, Some(v)), (_, None)) | ((_, None), (_, Some(v))) => Some(v.clone()),
            ((ini_pos, Some(a)), (fin_pos, Some(b))) => {
                if ini_pos == fin_pos {
                    return Some(a.clone());
                }
                match rule.apply(pos, ini_pos, fin_pos, a, b) {
                    Some(v) => Some(v),
                    None => {
                        warn!(
                            "cannot blend {:?} and {:?} with {rule:?} rule",
                            a.kind(),
                            b.kind()
                        );
                        Some(a.clone())
                    }
                }
            }
        }
    }
}

/// Build a calculator from its parts, logging the result.
pub(crate) fn build(
    key: &str,
    method: Method,
    source: (Option<f64>, Option<f64>),
    targets: Vec<Target>,
) -> Calculator {
    let mut calc = Calculator::new();
    calc.from(method, source.0, source.1).to(targets);
    debug!(
        "{key}: calculator built (method {method}, {} stops, static {})",
        calc.stops.len(),
        calc.static_value.is_some()
    );
    calc
}
