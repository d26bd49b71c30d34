use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vivaz_api_core::Value;

/// Default applied by [`Schema::configure`](super::Schema::configure).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrDefault {
    #[default]
    None,
    /// Plain default for the attribute itself.
    Value(Value),
    /// Defaults for the attribute inside each named nested node.
    PerNode(IndexMap<String, Value>),
}

impl From<Value> for AttrDefault {
    fn from(v: Value) -> Self {
        AttrDefault::Value(v)
    }
}

/// Accepted values for an attribute. Carried for UI builders; the core never
/// enforces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Range {
        min: f64,
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Options(Vec<Value>),
}

impl Constraint {
    pub fn range(min: f64, max: f64) -> Self {
        Constraint::Range {
            min,
            max,
            step: None,
        }
    }

    pub fn stepped(min: f64, max: f64, step: f64) -> Self {
        Constraint::Range {
            min,
            max,
            step: Some(step),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub name: String,
    #[serde(default)]
    pub default: AttrDefault,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Host-side property the attribute is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl AttributeConfig {
    pub fn new(name: impl Into<String>, default: AttrDefault, constraint: Option<Constraint>) -> Self {
        Self {
            name: name.into(),
            default,
            constraint,
            label: None,
            property: None,
        }
    }

    pub fn label(&mut self, text: impl Into<String>) -> &mut Self {
        self.label = Some(text.into());
        self
    }

    pub fn property(&mut self, name: impl Into<String>) -> &mut Self {
        self.property = Some(name.into());
        self
    }
}
