//! # Options Registry
//!
//! Typed, validated, defaultable key/value configuration for visualization
//! objects. Every configurable object owns an [`Options`] registry built from
//! its option set; callers hand it [`Overrides`] bundles which are validated
//! against the registered entries before anything is applied.
//!
//! The registry deliberately has "reset-to-default then merge-overrides"
//! semantics: [`Options::reset`] drops all current values back to their
//! defaults, and [`Options::apply`] merges a validated override bundle on
//! top. Objects that want sticky construction-time settings re-apply them
//! after each reset rather than relying on ambient state.
//!
//! ## Usage
//!
//! ```
//! use exoviz::options::{Entry, Options, Overrides};
//!
//! let mut opt = Options::new();
//! opt.add(Entry::string("label_type", "variable", "Type of label to create")
//!     .allow(&["point", "cell", "variable"]));
//!
//! let mut overrides = Overrides::new();
//! overrides.set_str("label_type", "cell");
//! opt.apply(&overrides).unwrap();
//! assert_eq!(opt.get_str("label_type").unwrap(), "cell");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::VizError;

/// A typed option payload
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Color([f32; 3]),
}

impl Value {
    /// Short name of the payload type, for validation messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Color(_) => "color",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Color(c) => write!(f, "({}, {}, {})", c[0], c[1], c[2]),
        }
    }
}

/// One registered option: default, current value, doc string, allow-list
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    doc: String,
    default: Value,
    value: Option<Value>,
    allow: Vec<Value>,
}

impl Entry {
    /// Create a string-valued entry
    pub fn string(name: &str, default: &str, doc: &str) -> Self {
        Self::with_default(name, Value::Str(default.to_string()), doc)
    }

    /// Create a bool-valued entry
    pub fn bool(name: &str, default: bool, doc: &str) -> Self {
        Self::with_default(name, Value::Bool(default), doc)
    }

    /// Create an integer-valued entry
    pub fn int(name: &str, default: i64, doc: &str) -> Self {
        Self::with_default(name, Value::Int(default), doc)
    }

    /// Create a float-valued entry
    pub fn float(name: &str, default: f64, doc: &str) -> Self {
        Self::with_default(name, Value::Float(default), doc)
    }

    /// Create a color-valued entry
    pub fn color(name: &str, default: [f32; 3], doc: &str) -> Self {
        Self::with_default(name, Value::Color(default), doc)
    }

    fn with_default(name: &str, default: Value, doc: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: doc.to_string(),
            default,
            value: None,
            allow: Vec::new(),
        }
    }

    /// Restrict the entry to a fixed set of string values
    pub fn allow(mut self, values: &[&str]) -> Self {
        self.allow = values.iter().map(|v| Value::Str(v.to_string())).collect();
        self
    }

    /// Option name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation string
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Resolved value: the current value if set, otherwise the default
    pub fn resolved(&self) -> &Value {
        self.value.as_ref().unwrap_or(&self.default)
    }

    fn validate(&self, value: &Value) -> Result<(), VizError> {
        if std::mem::discriminant(value) != std::mem::discriminant(&self.default) {
            return Err(VizError::InvalidOptionValue {
                name: self.name.clone(),
                reason: format!(
                    "expected {}, got {}",
                    self.default.kind(),
                    value.kind()
                ),
            });
        }
        if !self.allow.is_empty() && !self.allow.contains(value) {
            let allowed: Vec<String> = self.allow.iter().map(|v| v.to_string()).collect();
            return Err(VizError::InvalidOptionValue {
                name: self.name.clone(),
                reason: format!("'{}' is not one of [{}]", value, allowed.join(", ")),
            });
        }
        Ok(())
    }
}

/// A caller-facing bundle of option overrides
///
/// Unvalidated until handed to [`Options::apply`]; insertion order is kept so
/// later keys win and validation errors are reported deterministically.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    items: Vec<(String, Value)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value
    pub fn set(&mut self, name: &str, value: Value) -> &mut Self {
        self.items.push((name.to_string(), value));
        self
    }

    pub fn set_str(&mut self, name: &str, value: &str) -> &mut Self {
        self.set(name, Value::Str(value.to_string()))
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> &mut Self {
        self.set(name, Value::Bool(value))
    }

    pub fn set_int(&mut self, name: &str, value: i64) -> &mut Self {
        self.set(name, Value::Int(value))
    }

    pub fn set_float(&mut self, name: &str, value: f64) -> &mut Self {
        self.set(name, Value::Float(value))
    }

    pub fn set_color(&mut self, name: &str, value: [f32; 3]) -> &mut Self {
        self.set(name, Value::Color(value))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the contained key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Registry of typed options for one visualization object
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: BTreeMap<String, Entry>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option; re-registering a name replaces the entry
    pub fn add(&mut self, entry: Entry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Merge another option set into this one (shared option groups)
    pub fn extend(&mut self, other: Options) {
        for (name, entry) in other.entries {
            self.entries.insert(name, entry);
        }
    }

    /// Replace the default of an already-registered option
    pub fn set_default(&mut self, name: &str, value: Value) -> Result<(), VizError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| VizError::UnknownOption(name.to_string()))?;
        entry.validate(&value)?;
        entry.default = value;
        Ok(())
    }

    /// Drop all current values back to their defaults
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.value = None;
        }
    }

    /// Validate and merge an override bundle
    ///
    /// Fails on the first unknown key, type mismatch, or value outside an
    /// entry's allow-list; earlier pairs in the bundle stay applied.
    pub fn apply(&mut self, overrides: &Overrides) -> Result<(), VizError> {
        for (name, value) in overrides.iter() {
            let entry = self
                .entries
                .get_mut(name)
                .ok_or_else(|| VizError::UnknownOption(name.to_string()))?;
            entry.validate(value)?;
            entry.value = Some(value.clone());
        }
        Ok(())
    }

    /// Whether an option with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn resolved(&self, name: &str) -> Result<&Value, VizError> {
        self.entries
            .get(name)
            .map(|e| e.resolved())
            .ok_or_else(|| VizError::UnknownOption(name.to_string()))
    }

    pub fn get_str(&self, name: &str) -> Result<&str, VizError> {
        match self.resolved(name)? {
            Value::Str(v) => Ok(v),
            other => Err(self.type_error(name, "string", other)),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, VizError> {
        match self.resolved(name)? {
            Value::Bool(v) => Ok(*v),
            other => Err(self.type_error(name, "bool", other)),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64, VizError> {
        match self.resolved(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(self.type_error(name, "int", other)),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64, VizError> {
        match self.resolved(name)? {
            Value::Float(v) => Ok(*v),
            other => Err(self.type_error(name, "float", other)),
        }
    }

    pub fn get_color(&self, name: &str) -> Result<[f32; 3], VizError> {
        match self.resolved(name)? {
            Value::Color(v) => Ok(*v),
            other => Err(self.type_error(name, "color", other)),
        }
    }

    fn type_error(&self, name: &str, expected: &str, got: &Value) -> VizError {
        VizError::InvalidOptionValue {
            name: name.to_string(),
            reason: format!("expected {}, got {}", expected, got.kind()),
        }
    }
}
