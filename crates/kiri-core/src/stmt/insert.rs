use super::Record;

/// Inserts one row and returns it as stored.
///
/// An empty `values` record inserts a row made entirely of column defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub values: Record,
}

impl Insert {
    pub fn new(table: impl Into<String>, values: Record) -> Self {
        Self {
            table: table.into(),
            values,
        }
    }
}
