use super::{Filter, Record};

/// Assigns `assignments` to the row matching `filter` and returns it as
/// stored. Matches zero rows when the key does not exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: Record,
    pub filter: Filter,
}

impl Update {
    pub fn new(table: impl Into<String>, assignments: Record, filter: Filter) -> Self {
        Self {
            table: table.into(),
            assignments,
            filter,
        }
    }
}
