//! Core configuration for vivaz-dynamic-core.

use serde::{Deserialize, Serialize};

/// Tunables shared by a schema tree and the variables it owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Suffix of the sibling attribute that carries a color's alpha channel,
    /// e.g. `fill$alfa` for `fill`.
    pub alpha_suffix: String,

    /// Defaults applied by `Variable::noise_default`.
    pub default_noise_speed: f64,
    pub default_noise_scale: f64,

    /// Noise samplers start at a random offset in `[0, noise_offset_span)`.
    pub noise_offset_span: f64,

    /// Names given to new schemas and variables.
    pub schema_name: String,
    pub variable_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha_suffix: "$alfa".to_string(),
            default_noise_speed: 0.012,
            default_noise_scale: 1.0,
            noise_offset_span: 100_000.0,
            schema_name: "SCHEMA".to_string(),
            variable_name: "VARIABLE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "alpha_suffix": "_a" }"#).unwrap();
        assert_eq!(cfg.alpha_suffix, "_a");
        assert_eq!(cfg.default_noise_speed, 0.012);
        assert_eq!(cfg.variable_name, "VARIABLE");
    }
}
