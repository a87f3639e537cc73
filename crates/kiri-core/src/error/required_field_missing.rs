use super::Error;

/// A create payload, after translation and filtering, lacks one or more
/// columns that are non-nullable and have no default.
#[derive(Debug)]
pub(super) struct RequiredFieldMissingError {
    table: Box<str>,
    columns: Vec<String>,
}

impl std::error::Error for RequiredFieldMissingError {}

impl core::fmt::Display for RequiredFieldMissingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "required field missing: table={} columns=[{}]",
            self.table,
            self.columns.join(", ")
        )
    }
}

impl Error {
    /// Creates a required field missing error naming every absent column.
    pub fn required_field_missing(table: impl Into<String>, columns: Vec<String>) -> Error {
        Error::from(super::ErrorKind::RequiredFieldMissing(
            RequiredFieldMissingError {
                table: table.into().into(),
                columns,
            },
        ))
    }

    /// Returns `true` if this error is a required field missing error.
    pub fn is_required_field_missing(&self) -> bool {
        self.kinds().any(|kind| matches!(kind, super::ErrorKind::RequiredFieldMissing(_)))
    }

    /// The columns a required field missing error names, if this is one.
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self.kinds().find(|kind| matches!(kind, super::ErrorKind::RequiredFieldMissing(_))) {
            Some(super::ErrorKind::RequiredFieldMissing(err)) => Some(&err.columns),
            _ => None,
        }
    }
}
