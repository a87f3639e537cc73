use super::Error;

/// Error when a record lookup by primary key returns no results.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    pub(super) context: Option<Box<str>>,
}

impl RecordNotFoundError {
    pub(super) fn new(context: Option<Box<str>>) -> Self {
        RecordNotFoundError { context }
    }
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("record not found")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a record not found error.
    ///
    /// The context should identify the table and key, e.g.
    /// `table=marketplace_service key=(42)`.
    pub fn record_not_found(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError::new(
            Some(context.into().into()),
        )))
    }

    /// Returns `true` if this error is a record not found error.
    pub fn is_record_not_found(&self) -> bool {
        self.kinds().any(|kind| matches!(kind, super::ErrorKind::RecordNotFound(_)))
    }
}
