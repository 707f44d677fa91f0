//! Arguments after validation, defaults and type coercion.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::util::parse_date;

/// Validated argument mapping for one invocation.
///
/// Every required parameter is present; defaults have been applied and
/// values coerced to their declared types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArguments {
    values: Map<String, Value>,
}

impl ResolvedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    pub fn get_date(&self, name: &str) -> Option<NaiveDate> {
        self.get_str(name).and_then(parse_date)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
