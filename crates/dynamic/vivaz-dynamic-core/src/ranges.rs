//! Named-range registry: string key -> ordered stop list.
//!
//! Ships the built-in color gradients. Hosts may register more ranges of any
//! stop kind.

use hashbrown::HashMap;
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use vivaz_api_core::{Color, Value};

/// Weighted point of a destination range: `position` in [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub position: f64,
    pub value: Value,
}

impl Stop {
    pub fn new(position: f64, value: impl Into<Value>) -> Self {
        Self {
            position,
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RangeRegistry {
    ranges: HashMap<String, Vec<Stop>>,
}

static BUILTIN: Lazy<RangeRegistry> = Lazy::new(|| {
    let mut reg = RangeRegistry::new();
    for (name, stops) in BUILTIN_GRADIENTS {
        let stops = stops
            .iter()
            .filter_map(|(pos, css)| match Color::from_css(css) {
                Ok(c) => Some(Stop::new(*pos, c)),
                Err(e) => {
                    warn!("built-in gradient '{name}': {e}");
                    None
                }
            })
            .collect();
        reg.register(*name, stops);
    }
    reg
});

type GradientTable = &'static [(&'static str, &'static [(f64, &'static str)])];

const BUILTIN_GRADIENTS: GradientTable = &[
    ("default", &[(0.0, "rgb(255,255,255)")]),
    (
        "coral",
        &[
            (0.0, "rgb(253,127,128)"),
            (0.14, "rgb(254,129,173)"),
            (0.34, "rgb(94,154,232)"),
            (0.5, "rgb(253,127,128)"),
            (0.58, "rgb(0,0,0)"),
            (0.61, "rgb(193,217,243)"),
            (0.8, "rgb(94,154,232)"),
            (0.95, "rgb(0,104,200)"),
            (1.0, "rgb(0,0,0)"),
        ],
    ),
    (
        "emerald",
        &[
            (0.0, "#333"),
            (0.14, "#f3d3bd"),
            (0.34, "#5e5e5e"),
            (0.5, "#48e5c2"),
            (0.58, "#333"),
            (0.61, "#fcfaf9"),
            (0.95, "#5e5e5e"),
            (1.0, "#333"),
        ],
    ),
    (
        "universal",
        &[
            (0.0, "#c0bda5"),
            (0.15, "#f39c6b"),
            (0.30, "#ff3864"),
            (0.45, "#261447"),
            (0.60, "#cc978e"),
            (0.75, "#f39c6b"),
            (0.90, "#c0bda5"),
            (1.0, "#261447"),
        ],
    ),
    (
        "chalk",
        &[
            (0.0, "#efeee9"),
            (0.15, "#c5c4c1"),
            (0.30, "#efeee9"),
            (0.45, "#7d7d7d"),
            (0.60, "#efeee9"),
            (0.75, "#d7d6d2"),
            (0.90, "#efeee9"),
            (1.0, "#efeee9"),
        ],
    ),
    (
        "lucent",
        &[
            (0.0, "#0C0B0B"),
            (0.15, "#F1CE01"),
            (0.30, "#F1CE01"),
            (0.45, "#0C0B0B"),
            (0.60, "#0C0B0B"),
            (0.75, "#978A82"),
            (0.90, "#F1CE01"),
            (1.0, "#F1CE01"),
        ],
    ),
    (
        "flamingo",
        &[
            (0.0, "#BEFFF3"),
            (0.15, "#57F1D6"),
            (0.30, "#19E8C2"),
            (0.45, "#006f5a"),
            (0.75, "#57F1D6"),
            (0.90, "#ffaff6"),
            (1.0, "#BEFFF3"),
        ],
    ),
    (
        "cadet",
        &[
            (0.0, "#BAFF29"),
            (0.14, "#C2E7DA"),
            (0.34, "#6290C3"),
            (0.45, "#F1FFE7"),
            (0.5, "#BAFF29"),
            (0.58, "#1A1B41"),
            (0.8, "#6290C3"),
            (0.88, "#C2E7DA"),
            (0.95, "#F1FFE7"),
            (1.0, "#1A1B41"),
        ],
    ),
];

impl RangeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry holding only the built-in gradients.
    pub fn builtin() -> &'static RangeRegistry {
        &BUILTIN
    }

    /// Owned copy of the built-in gradients, ready for extra registrations.
    pub fn with_builtins() -> Self {
        BUILTIN.clone()
    }

    /// Register (or replace) a range. Stops are kept in the given order.
    pub fn register(&mut self, name: impl Into<String>, stops: Vec<Stop>) {
        self.ranges.insert(name.into(), stops);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(name)
    }

    /// Stops of `name`; unknown names resolve to an empty list.
    pub fn lookup(&self, name: &str) -> &[Stop] {
        match self.ranges.get(name) {
            Some(stops) => stops,
            None => {
                warn!("unknown named range '{name}'");
                &[]
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(|k| k.as_str())
    }
}
