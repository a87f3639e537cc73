use super::{Key, Value};

/// Restricts a statement to the row whose primary key equals `key`.
///
/// `columns` and `key` are parallel: column `i` must equal value `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub columns: Vec<String>,
    pub key: Key,
}

impl Filter {
    pub fn new(columns: Vec<String>, key: Key) -> Self {
        debug_assert_eq!(columns.len(), key.len(), "key arity mismatch");
        Self { columns, key }
    }

    /// Column and value pairs, in primary-key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.key.values())
    }
}
