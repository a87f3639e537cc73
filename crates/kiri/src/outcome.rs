use crate::{FieldWarning, Key, Record};

/// The result of a successful create.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    /// Primary key of the new row, generated or supplied
    pub key: Key,

    /// The row as stored, with client field names
    pub record: Record,

    /// Payload fields that were not written
    pub warnings: Vec<FieldWarning>,
}

/// The result of a successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct Updated {
    /// The row as stored after the update, with client field names
    pub record: Record,

    /// Payload fields that were not written
    pub warnings: Vec<FieldWarning>,
}
