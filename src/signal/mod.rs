use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NAME_FIELD: &str = "Company Name";
pub const DOMAIN_FIELD: &str = "Domain";
pub const RANK_FIELD: &str = "Rank";

/// One company/domain record. Fields other than name, domain and rank are
/// opaque and only ever rendered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal {
    fields: Map<String, Value>,
}

impl Signal {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Text of `field` if it holds a JSON string. Numbers and other values
    /// never take part in substring matching.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.text(NAME_FIELD)
    }

    pub fn domain(&self) -> Option<&str> {
        self.text(DOMAIN_FIELD)
    }

    pub fn rank(&self) -> Option<&Value> {
        self.get(RANK_FIELD)
    }

    /// Rendered value of `field`; absent fields render as an empty string.
    pub fn display(&self, field: &str) -> String {
        self.get(field).map(display_value).unwrap_or_default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Signal {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// The loaded dataset. Cloning shares the underlying records.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    signals: Arc<[Signal]>,
}

impl Collection {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            signals: signals.into(),
        }
    }

    pub fn as_slice(&self) -> &[Signal] {
        &self.signals
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signal> {
        self.signals.iter()
    }
}

impl FromIterator<Signal> for Collection {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Signal;
    type IntoIter = std::slice::Iter<'a, Signal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
