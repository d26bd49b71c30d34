//! Evaluation methods: named functions of the execution context that yield a
//! normalized position in [0, 1].

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::{ExecutionContext, RandomHold};
use crate::error::EvalError;
use crate::host::Host;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Static value, never evaluated.
    #[default]
    Fixed,
    /// `sin(t / m) / 2 + 0.5`
    Cycle,
    /// `cos(t / m) / 2 + 0.5`
    CounterCycle,
    /// Sawtooth `(t mod m) / m`
    Span,
    /// Random number held for `m` milliseconds.
    RandomHold,
    /// Noise sampler stepped by `m` per call.
    Noise,
    // Reserved names; evaluating them is an error.
    Order,
    Count,
    Distance,
    DistanceX,
    DistanceY,
    DistanceZ,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown evaluation method '{0}'")]
pub struct MethodParseError(pub String);

impl Method {
    pub const ALL: [Method; 12] = [
        Method::Fixed,
        Method::Cycle,
        Method::CounterCycle,
        Method::Span,
        Method::RandomHold,
        Method::Noise,
        Method::Order,
        Method::Count,
        Method::Distance,
        Method::DistanceX,
        Method::DistanceY,
        Method::DistanceZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::Fixed => "fixed",
            Method::Cycle => "cycle",
            Method::CounterCycle => "counter-cycle",
            Method::Span => "span",
            Method::RandomHold => "random-hold",
            Method::Noise => "noise",
            Method::Order => "order",
            Method::Count => "count",
            Method::Distance => "distance",
            Method::DistanceX => "distance-x",
            Method::DistanceY => "distance-y",
            Method::DistanceZ => "distance-z",
        }
    }

    /// Names accepted by the configuration DSL but without an evaluator.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            Method::Order
                | Method::Count
                | Method::Distance
                | Method::DistanceX
                | Method::DistanceY
                | Method::DistanceZ
        )
    }

    /// Modulator used when a variable does not configure one: a period in
    /// milliseconds for the time-based methods, a noise step for `noise`.
    pub fn default_modulator(self) -> f64 {
        match self {
            Method::Cycle | Method::CounterCycle => 1800.0,
            Method::Span => 444.0,
            Method::RandomHold => 1200.0,
            Method::Noise => 0.016,
            _ => 1.0,
        }
    }

    /// Raw position for the current frame. `Ok(None)` for `fixed`.
    pub fn evaluate(
        self,
        ctx: &mut ExecutionContext,
        host: &mut dyn Host,
    ) -> Result<Option<f64>, EvalError> {
        let m = ctx.modulator();
        let pos = match self {
            Method::Fixed => return Ok(None),
            Method::Cycle => (host.time_ms() / m).sin() / 2.0 + 0.5,
            Method::CounterCycle => (host.time_ms() / m).cos() / 2.0 + 0.5,
            Method::Span => host.time_ms().rem_euclid(m) / m,
            Method::RandomHold => {
                let now = host.time_ms();
                match ctx.hold {
                    Some(hold) if now - hold.generated_at < m => hold.value,
                    _ => {
                        let value = host.random();
                        trace!("{}: random-hold regenerated {value:.4} at {now}", ctx.key());
                        ctx.hold = Some(RandomHold {
                            value,
                            generated_at: now,
                        });
                        value
                    }
                }
            }
            Method::Noise => ctx.sampler.sample(host),
            reserved => return Err(EvalError::NotImplemented(reserved)),
        };
        Ok(Some(pos))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| MethodParseError(s.to_string()))
    }
}
