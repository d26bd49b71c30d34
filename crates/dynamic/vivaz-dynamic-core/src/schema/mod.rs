//! Attribute store.
//!
//! A [`Schema`] maps attribute names to [`Attr`] entries in insertion order:
//! plain values, nested schemas or [`Variable`]s. It also keeps optional
//! per-attribute configs, a synchronization flag and a visibility flag.
//!
//! Writes go through `define` (JSON, merged recursively) or `set` (typed).
//! Reads go through `value`, which evaluates variables and applies the alpha
//! sibling of color attributes.

mod attr_config;
mod export;
mod import;

use std::sync::Arc;

use indexmap::IndexMap;
use log::warn;
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;
use vivaz_api_core::{json, Value};

use crate::config::Config;
use crate::error::{EvalError, SchemaError};
use crate::host::Host;
use crate::variable::{self, Variable};

pub use attr_config::{AttrDefault, AttributeConfig, Constraint};
pub use import::{parse_export, ImportError};

#[derive(Clone, Debug)]
pub enum Attr {
    Scalar(Value),
    Nested(Schema),
    Dynamic(Box<Variable>),
}

impl From<Value> for Attr {
    fn from(v: Value) -> Self {
        Attr::Scalar(v)
    }
}

impl From<Schema> for Attr {
    fn from(s: Schema) -> Self {
        Attr::Nested(s)
    }
}

impl From<Variable> for Attr {
    fn from(v: Variable) -> Self {
        Attr::Dynamic(Box::new(v))
    }
}

#[derive(Clone, Debug)]
pub struct Schema {
    name: String,
    key: String,
    attrs: IndexMap<String, Attr>,
    configs: IndexMap<String, AttributeConfig>,
    synchronized: bool,
    visible: bool,
    config: Arc<Config>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::with_config(Arc::new(Config::default()))
    }

    pub fn with_config(config: Arc<Config>) -> Self {
        let name = config.schema_name.clone();
        Self::named_with_config(name, config)
    }

    pub fn named_with_config(name: impl Into<String>, config: Arc<Config>) -> Self {
        let name = name.into();
        Self {
            key: format!("{name}-{}", Uuid::new_v4()),
            name,
            attrs: IndexMap::new(),
            configs: IndexMap::new(),
            synchronized: true,
            visible: true,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique `<name>-<uuid>` key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn shared_config(&self) -> &Arc<Config> {
        &self.config
    }

    // ----- writes -----

    /// Merge a JSON object into the schema. See [`Schema::define_object`].
    pub fn define(&mut self, attrs: &JsonValue) -> Result<(), SchemaError> {
        match attrs {
            JsonValue::Object(map) => self.define_object(map),
            _ => Err(SchemaError::NotAnObject),
        }
    }

    /// Merge `attrs` into the schema.
    ///
    /// - `null` removes the attribute;
    /// - a variable descriptor (`method` plus `value` or `valueFrom`) becomes a
    ///   new [`Variable`];
    /// - a tagged `{type, data}` object or a `mode`-marked color is a value;
    /// - any other object merges into the nested schema of that name, or into
    ///   the existing variable;
    /// - anything else is parsed as a [`Value`].
    ///
    /// The node is marked unsynchronized even when nothing changes, and also
    /// when an entry fails after earlier entries were written.
    pub fn define_object(&mut self, attrs: &Map<String, JsonValue>) -> Result<(), SchemaError> {
        self.synchronized = false;
        for (name, value) in attrs {
            self.define_entry(name, value)?;
        }
        Ok(())
    }

    pub(crate) fn define_entry(&mut self, name: &str, value: &JsonValue) -> Result<(), SchemaError> {
        match value {
            JsonValue::Null => {
                self.attrs.shift_remove(name);
            }
            JsonValue::Object(obj) if variable::is_descriptor(obj) => {
                let var = Variable::from_descriptor(obj, Arc::clone(&self.config))?;
                self.attrs.insert(name.to_string(), var.into());
            }
            JsonValue::Object(obj) if !json::is_value_object(obj) => match self.attrs.get_mut(name) {
                Some(Attr::Nested(child)) => child.define_object(obj)?,
                Some(Attr::Dynamic(var)) => {
                    var.define(obj)?;
                }
                _ => {
                    let mut child = Schema::named_with_config(name, Arc::clone(&self.config));
                    child.define_object(obj)?;
                    self.attrs.insert(name.to_string(), Attr::Nested(child));
                }
            },
            other => {
                let v = json::parse_value(other.clone())?;
                self.attrs.insert(name.to_string(), Attr::Scalar(v));
            }
        }
        Ok(())
    }

    /// Store a typed entry, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, attr: impl Into<Attr>) {
        self.attrs.insert(name.into(), attr.into());
        self.synchronized = false;
    }

    pub fn remove(&mut self, name: &str) -> Option<Attr> {
        let removed = self.attrs.shift_remove(name);
        self.synchronized = false;
        removed
    }

    pub fn clear(&mut self) {
        self.attrs.clear();
        self.synchronized = false;
    }

    /// Parse export text and merge it with [`Schema::define_object`].
    pub fn import(&mut self, text: &str) -> Result<(), SchemaError> {
        let attrs = parse_export(text)?;
        self.define_object(&attrs)
    }

    // ----- reads -----

    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Attr> {
        self.attrs.get_mut(name)
    }

    /// Plain value stored under `name`, without evaluation.
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match self.attrs.get(name) {
            Some(Attr::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    /// Nested schema at a dot path.
    pub fn node(&self, path: &str) -> Option<&Schema> {
        path.split('.').try_fold(self, |node, seg| match node.attrs.get(seg) {
            Some(Attr::Nested(child)) => Some(child),
            _ => None,
        })
    }

    pub fn node_mut(&mut self, path: &str) -> Option<&mut Schema> {
        path.split('.').try_fold(self, |node, seg| match node.attrs.get_mut(seg) {
            Some(Attr::Nested(child)) => Some(child),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attr)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Resolve the value at a dot path such as `stroke.weight`.
    ///
    /// Variables are evaluated against `host`. A color picks up its alpha
    /// from the sibling `<name><alpha_suffix>` when present. Nested schemas
    /// and missing entries yield `None`.
    pub fn value(&mut self, path: &str, host: &mut dyn Host) -> Result<Option<Value>, EvalError> {
        let (node, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => match self.node_mut(parent) {
                Some(node) => (node, leaf),
                None => return Ok(None),
            },
            None => (self, path),
        };
        node.leaf_value(leaf, host)
    }

    fn leaf_value(&mut self, name: &str, host: &mut dyn Host) -> Result<Option<Value>, EvalError> {
        let value = match self.attrs.get_mut(name) {
            Some(Attr::Scalar(v)) => v.clone(),
            Some(Attr::Dynamic(var)) => match var.val(host)? {
                Some(v) => v,
                None => return Ok(None),
            },
            Some(Attr::Nested(_)) | None => return Ok(None),
        };
        let Value::Color(mut color) = value else {
            return Ok(Some(value));
        };
        let alpha_name = format!("{name}{}", self.config.alpha_suffix);
        if self.attrs.contains_key(&alpha_name) {
            if let Some(alpha) = self.leaf_value(&alpha_name, host)?.and_then(|v| v.as_number()) {
                color.set_alpha(alpha);
            }
        }
        Ok(Some(Value::Color(color)))
    }

    // ----- configs -----

    /// Record the config of `name` and back-fill its default where the
    /// attribute was never set.
    pub fn configure(
        &mut self,
        name: impl Into<String>,
        default: AttrDefault,
        constraint: Option<Constraint>,
    ) -> &mut AttributeConfig {
        let name = name.into();
        match &default {
            AttrDefault::None => {}
            AttrDefault::Value(v) => {
                if !self.attrs.contains_key(&name) {
                    self.attrs.insert(name.clone(), Attr::Scalar(v.clone()));
                    self.synchronized = false;
                }
            }
            AttrDefault::PerNode(nodes) => {
                for (node, v) in nodes {
                    let entry = self.attrs.entry(node.clone()).or_insert_with(|| {
                        let mut child = Schema::named_with_config(node, Arc::clone(&self.config));
                        child.synchronized = false;
                        Attr::Nested(child)
                    });
                    match entry {
                        Attr::Nested(child) => {
                            if !child.attrs.contains_key(&name) {
                                child.attrs.insert(name.clone(), Attr::Scalar(v.clone()));
                                child.synchronized = false;
                                self.synchronized = false;
                            }
                        }
                        _ => warn!(
                            "{}: '{node}' is not a nested node; default for '{name}' skipped",
                            self.key
                        ),
                    }
                }
            }
        }
        let (idx, _) = self
            .configs
            .insert_full(name.clone(), AttributeConfig::new(name, default, constraint));
        &mut self.configs[idx]
    }

    pub fn config(&self, name: &str) -> Option<&AttributeConfig> {
        self.configs.get(name)
    }

    pub fn configs(&self) -> impl Iterator<Item = &AttributeConfig> {
        self.configs.values()
    }

    // ----- sync and visibility -----

    /// Sync flag of the root, or of the nested node `child`. Entries that are
    /// not nested schemas report `true`.
    pub fn is_synchronized(&self, child: Option<&str>) -> bool {
        match child {
            None => self.synchronized,
            Some(name) => match self.attrs.get(name) {
                Some(Attr::Nested(node)) => node.synchronized,
                _ => true,
            },
        }
    }

    pub fn mark_synchronized(&mut self, child: Option<&str>) {
        match child {
            None => self.synchronized = true,
            Some(name) => {
                if let Some(Attr::Nested(node)) = self.attrs.get_mut(name) {
                    node.synchronized = true;
                }
            }
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // ----- export -----

    /// Export text with entries indented one tab past `indent`. `None` when
    /// the node holds no exportable values.
    pub fn export(&self, indent: &str) -> Option<String> {
        let inner = format!("{indent}\t");
        let entries = self.attrs.iter().filter_map(|(name, attr)| {
            let rendered = match attr {
                Attr::Scalar(v) => export::render_value(v, &inner),
                Attr::Nested(node) => node.export(&inner),
                Attr::Dynamic(var) => var.export(&inner),
            };
            rendered.map(|r| (name.clone(), r))
        });
        export::render_block(entries, indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualHost;
    use serde_json::json;
    use vivaz_api_core::{Color, Vector};

    #[test]
    fn define_scalars_and_nested() {
        let mut s = Schema::new();
        s.define(&json!({
            "size": 4,
            "label": "disc",
            "pos": [1, 2],
            "stroke": { "weight": 2, "fill": { "mode": "rgb", "r": 255, "g": 0, "b": 0 } }
        }))
        .unwrap();
        assert_eq!(s.scalar("size"), Some(&Value::Number(4.0)));
        assert_eq!(s.scalar("pos"), Some(&Value::Vector(Vector::xy(1.0, 2.0))));
        let stroke = s.node("stroke").unwrap();
        assert_eq!(stroke.scalar("weight"), Some(&Value::Number(2.0)));
        assert!(stroke.scalar("fill").unwrap().is_color());
        assert_eq!(stroke.name(), "stroke");
    }

    #[test]
    fn shorthand_keys_stay_nested_nodes() {
        let mut host = ManualHost::new(0);
        let mut s = Schema::new();
        s.define(&json!({
            "brush": { "color": "#ff0000" },
            "stats": { "number": "five" },
            "offset": { "x": 1, "y": 2 }
        }))
        .unwrap();
        assert!(s.node("brush").is_some());
        assert_eq!(
            s.value("brush.color", &mut host).unwrap(),
            Some(Value::Text("#ff0000".into()))
        );
        assert_eq!(
            s.value("stats.number", &mut host).unwrap(),
            Some(Value::Text("five".into()))
        );
        assert_eq!(s.value("offset.x", &mut host).unwrap(), Some(Value::Number(1.0)));

        s.define(&json!({ "at": { "type": "vector", "data": { "x": 3 } } })).unwrap();
        assert_eq!(
            s.scalar("at"),
            Some(&Value::Vector(Vector::new(Some(3.0), None, None)))
        );
    }

    #[test]
    fn failed_define_still_desynchronizes() {
        let mut s = Schema::new();
        s.mark_synchronized(None);
        let err = s
            .define(&json!({ "a": 1, "bad": { "type": "number", "data": "x" } }))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Value(_)));
        assert_eq!(s.scalar("a"), Some(&Value::Number(1.0)));
        assert!(!s.is_synchronized(None));
    }

    #[test]
    fn define_merges_and_null_removes() {
        let mut s = Schema::new();
        s.define(&json!({ "stroke": { "weight": 2, "cap": "round" } })).unwrap();
        s.define(&json!({ "stroke": { "weight": 3, "cap": null } })).unwrap();
        let stroke = s.node("stroke").unwrap();
        assert_eq!(stroke.scalar("weight"), Some(&Value::Number(3.0)));
        assert!(stroke.get("cap").is_none());
        assert!(matches!(s.define(&json!(3)), Err(SchemaError::NotAnObject)));
    }

    #[test]
    fn descriptor_becomes_variable() {
        let mut host = ManualHost::new(0);
        let mut s = Schema::new();
        s.define(&json!({ "size": { "method": "span", "valueFrom": 0, "valueTo": 10 } }))
            .unwrap();
        assert!(matches!(s.get("size"), Some(Attr::Dynamic(_))));
        host.set_time(222.0);
        assert_eq!(s.value("size", &mut host).unwrap(), Some(Value::Number(5.0)));

        // later non-descriptor objects are forwarded to the variable
        s.define(&json!({ "size": { "valueTo": 20 } })).unwrap();
        assert_eq!(s.value("size", &mut host).unwrap(), Some(Value::Number(10.0)));
    }

    #[test]
    fn value_follows_paths() {
        let mut host = ManualHost::new(0);
        let mut s = Schema::new();
        s.define(&json!({ "a": { "b": { "c": 1.5 } } })).unwrap();
        assert_eq!(s.value("a.b.c", &mut host).unwrap(), Some(Value::Number(1.5)));
        assert_eq!(s.value("a.b", &mut host).unwrap(), None);
        assert_eq!(s.value("a.x.c", &mut host).unwrap(), None);
        assert_eq!(s.value("missing", &mut host).unwrap(), None);
    }

    #[test]
    fn color_takes_alpha_sibling() {
        let mut host = ManualHost::new(0);
        let mut s = Schema::new();
        s.set("fill", Value::Color(Color::rgb(10.0, 20.0, 30.0)));
        s.set("fill$alfa", Value::Number(128.0));
        assert_eq!(
            s.value("fill", &mut host).unwrap(),
            Some(Value::Color(Color::rgba(10.0, 20.0, 30.0, 128.0)))
        );

        let mut dynamic_alpha = Variable::new();
        dynamic_alpha.map(&[Value::Text("fixed".into()), Value::Number(64.0)]);
        s.set("fill$alfa", dynamic_alpha);
        let got = s.value("fill", &mut host).unwrap().unwrap();
        assert_eq!(got.as_color().map(|c| c.alpha()), Some(64.0));
    }

    #[test]
    fn sync_flags_are_shallow() {
        let mut s = Schema::new();
        assert!(s.is_synchronized(None));
        s.define(&json!({ "stroke": { "weight": 1 } })).unwrap();
        assert!(!s.is_synchronized(None));
        assert!(!s.is_synchronized(Some("stroke")));
        s.mark_synchronized(None);
        assert!(s.is_synchronized(None));
        assert!(!s.is_synchronized(Some("stroke")));
        s.mark_synchronized(Some("stroke"));
        assert!(s.is_synchronized(Some("stroke")));
        assert!(s.is_synchronized(Some("unknown")));

        // defining nothing still desynchronizes
        s.define(&json!({})).unwrap();
        assert!(!s.is_synchronized(None));
    }

    #[test]
    fn configure_backfills_defaults() {
        let mut s = Schema::new();
        s.set("weight", Value::Number(5.0));
        s.mark_synchronized(None);
        s.configure("weight", AttrDefault::Value(Value::Number(1.0)), Some(Constraint::range(0.0, 10.0)))
            .label("Weight")
            .property("stroke_weight");
        assert_eq!(s.scalar("weight"), Some(&Value::Number(5.0)));
        assert!(s.is_synchronized(None));

        s.configure("speed", AttrDefault::Value(Value::Number(2.0)), None);
        assert_eq!(s.scalar("speed"), Some(&Value::Number(2.0)));
        assert!(!s.is_synchronized(None));

        let cfg = s.config("weight").unwrap();
        assert_eq!(cfg.label.as_deref(), Some("Weight"));
        assert_eq!(cfg.property.as_deref(), Some("stroke_weight"));
        assert_eq!(s.configs().count(), 2);
    }

    #[test]
    fn configure_per_node_defaults() {
        let mut s = Schema::new();
        s.define(&json!({ "front": { "size": 9 } })).unwrap();
        s.mark_synchronized(None);
        s.mark_synchronized(Some("front"));
        let per_node: IndexMap<String, Value> = [
            ("front".to_string(), Value::Number(1.0)),
            ("back".to_string(), Value::Number(2.0)),
        ]
        .into_iter()
        .collect();
        s.configure("size", AttrDefault::PerNode(per_node), None);
        assert_eq!(s.node("front").unwrap().scalar("size"), Some(&Value::Number(9.0)));
        assert_eq!(s.node("back").unwrap().scalar("size"), Some(&Value::Number(2.0)));
        assert!(s.is_synchronized(Some("front")));
        assert!(!s.is_synchronized(Some("back")));
        assert!(!s.is_synchronized(None));
    }

    #[test]
    fn visibility() {
        let mut s = Schema::new();
        assert!(s.visible());
        s.set_visible(false);
        assert!(!s.visible());
        assert_eq!(s.export(""), None);
    }

    #[test]
    fn export_layout() {
        let mut s = Schema::new();
        s.define(&json!({ "size": 4, "name": "disc", "stroke": { "on": true } })).unwrap();
        assert_eq!(
            s.export("").unwrap(),
            "{\n\tsize\t:\t4,\n\tname\t:\t'disc',\n\tstroke\t:\t{\n\t\ton\t:\ttrue,\n\t},\n}"
        );
    }

    #[test]
    fn keys_are_unique() {
        let a = Schema::new();
        let b = Schema::new();
        assert_ne!(a.key(), b.key());
        assert!(a.key().starts_with("SCHEMA-"));
    }
}
