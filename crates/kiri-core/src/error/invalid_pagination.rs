use super::Error;

#[derive(Debug)]
pub(super) struct InvalidPaginationError {
    message: Box<str>,
}

impl std::error::Error for InvalidPaginationError {}

impl core::fmt::Display for InvalidPaginationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid pagination: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid pagination error (e.g. a zero `limit`).
    pub fn invalid_pagination(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPagination(InvalidPaginationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid pagination error.
    pub fn is_invalid_pagination(&self) -> bool {
        self.kinds().any(|kind| matches!(kind, super::ErrorKind::InvalidPagination(_)))
    }
}
