//! Configuration requests accepted by [`Variable::apply`](crate::Variable::apply).
//!
//! `MapRequest::parse` is the arity-overloaded compatibility entry used by
//! `Variable::map`; everything else builds requests through the factories.

use vivaz_api_core::Value;

use crate::method::Method;

/// Destination of a source-mapped request.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceTarget {
    /// Named range from the registry.
    Range(String),
    /// Two-stop range between bounds.
    Bounds { from: Value, to: Value },
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapRequest {
    /// Static value.
    Fixed(Value),
    /// Method only; every other attribute stays at its default.
    Method(Method),
    /// Named range over the default source range.
    RangeByName {
        method: Method,
        range: String,
        modulator: Option<Value>,
    },
    /// Two-stop range over the default source range.
    RangeByBounds { method: Method, from: Value, to: Value },
    /// Two-stop range with an explicit modulator.
    TimeMapped {
        method: Method,
        from: Value,
        to: Value,
        modulator: Value,
    },
    /// Explicit source range mapped onto a named range or bounds.
    SourceMapped {
        method: Method,
        origin_from: Value,
        origin_to: Value,
        target: SourceTarget,
        modulator: Option<Value>,
    },
}

impl MapRequest {
    pub fn fixed(value: impl Into<Value>) -> Self {
        MapRequest::Fixed(value.into())
    }

    pub fn method(method: Method) -> Self {
        MapRequest::Method(method)
    }

    pub fn range_by_name(method: Method, range: impl Into<String>, modulator: Option<Value>) -> Self {
        MapRequest::RangeByName {
            method,
            range: range.into(),
            modulator,
        }
    }

    pub fn range_by_bounds(method: Method, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        MapRequest::RangeByBounds {
            method,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn time_mapped(
        method: Method,
        from: impl Into<Value>,
        to: impl Into<Value>,
        modulator: impl Into<Value>,
    ) -> Self {
        MapRequest::TimeMapped {
            method,
            from: from.into(),
            to: to.into(),
            modulator: modulator.into(),
        }
    }

    pub fn source_mapped(
        method: Method,
        origin_from: impl Into<Value>,
        origin_to: impl Into<Value>,
        target: SourceTarget,
        modulator: Option<Value>,
    ) -> Self {
        MapRequest::SourceMapped {
            method,
            origin_from: origin_from.into(),
            origin_to: origin_to.into(),
            target,
            modulator,
        }
    }

    /// Parse positional `map` arguments. `None` for an empty list.
    ///
    /// | args | shape                                            |
    /// |------|--------------------------------------------------|
    /// | 1    | method name, or a static value                   |
    /// | 2+   | `fixed, value`                                   |
    /// | 2-3  | `m, range [, modulator]`                         |
    /// | 2    | `m, to` (from = 0)                               |
    /// | 3    | `m, from, to`                                    |
    /// | 4    | `m, oFrom, oTo, range` or `m, from, to, mod`     |
    /// | 5    | `m, oFrom, oTo, range, mod` or `.., from, to`    |
    /// | 6+   | `m, oFrom, oTo, from, to, mod`                   |
    ///
    /// Any text in the range slot names a range.
    pub fn parse(args: &[Value]) -> Option<MapRequest> {
        let first = args.first()?;
        let Some(method) = first.as_text().and_then(|s| s.parse::<Method>().ok()) else {
            return Some(MapRequest::Fixed(first.clone()));
        };
        let arg = |i: usize| args[i].clone();

        Some(match (args.len(), args.get(1).and_then(Value::as_text)) {
            (1, _) => MapRequest::Method(method),
            _ if method == Method::Fixed => MapRequest::Fixed(arg(1)),
            (n, Some(range)) => MapRequest::RangeByName {
                method,
                range: range.to_string(),
                modulator: (n > 2).then(|| arg(2)),
            },
            (2, _) => MapRequest::RangeByBounds {
                method,
                from: Value::Number(0.0),
                to: arg(1),
            },
            (3, _) => MapRequest::RangeByBounds {
                method,
                from: arg(1),
                to: arg(2),
            },
            (4, _) => match &args[3] {
                Value::Text(range) => MapRequest::SourceMapped {
                    method,
                    origin_from: arg(1),
                    origin_to: arg(2),
                    target: SourceTarget::Range(range.clone()),
                    modulator: None,
                },
                _ => MapRequest::TimeMapped {
                    method,
                    from: arg(1),
                    to: arg(2),
                    modulator: arg(3),
                },
            },
            (5, _) => MapRequest::SourceMapped {
                method,
                origin_from: arg(1),
                origin_to: arg(2),
                target: match &args[3] {
                    Value::Text(range) => SourceTarget::Range(range.clone()),
                    _ => SourceTarget::Bounds {
                        from: arg(3),
                        to: arg(4),
                    },
                },
                modulator: args[3].as_text().map(|_| arg(4)),
            },
            _ => MapRequest::SourceMapped {
                method,
                origin_from: arg(1),
                origin_to: arg(2),
                target: SourceTarget::Bounds {
                    from: arg(3),
                    to: arg(4),
                },
                modulator: Some(arg(5)),
            },
        })
    }
}
