use super::Error;

/// Error when the store's schema cannot be discovered.
///
/// This occurs when:
/// - The store is unreachable while building a catalog
/// - A table reports zero columns
/// - A table's primary key references a column that was not reported
/// - A table reports the same column twice
///
/// Fatal at startup; a later refresh may succeed.
#[derive(Debug)]
pub(super) struct SchemaIntrospectionError {
    message: Box<str>,
}

impl std::error::Error for SchemaIntrospectionError {}

impl core::fmt::Display for SchemaIntrospectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "schema introspection failed: {}", self.message)
    }
}

impl Error {
    /// Creates a schema introspection error.
    pub fn schema_introspection(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaIntrospection(
            SchemaIntrospectionError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a schema introspection error.
    pub fn is_schema_introspection(&self) -> bool {
        self.kinds().any(|kind| matches!(kind, super::ErrorKind::SchemaIntrospection(_)))
    }
}
