use super::Value;

use std::fmt;

/// Identifies one row: a value per primary-key column, in primary-key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Key(Vec<Value>);

impl Key {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Splits a URL path segment into the raw key components.
    ///
    /// Composite keys are written as comma-separated components, e.g.
    /// `3,7`. Components are not trimmed.
    pub fn split_path(segment: &str) -> Vec<&str> {
        segment.split(',').collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    /// Renders the key the way it appears in a resource path.
    pub fn to_path(&self) -> String {
        self.0
            .iter()
            .map(|value| match value {
                Value::String(v) => v.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self(vec![Value::I64(value)])
    }
}

impl From<Vec<Value>> for Key {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}
