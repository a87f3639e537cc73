use super::Error;

/// The store rejected a write because it would violate a declared
/// constraint (foreign key, uniqueness, check).
///
/// The typical case is deleting a row that other rows still reference when
/// the foreign key was not declared with `ON DELETE CASCADE`.
#[derive(Debug)]
pub(super) struct IntegrityConstraintError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for IntegrityConstraintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for IntegrityConstraintError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "integrity constraint violated: {}", self.inner)
    }
}

impl Error {
    /// Creates an integrity constraint error from the store's report.
    pub fn integrity_constraint(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::IntegrityConstraint(
            IntegrityConstraintError {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is an integrity constraint violation.
    pub fn is_integrity_constraint(&self) -> bool {
        self.kinds().any(|kind| matches!(kind, super::ErrorKind::IntegrityConstraint(_)))
    }
}
