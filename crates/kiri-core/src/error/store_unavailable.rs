use super::Error;

/// The store could not be reached while serving a request.
///
/// Covers connection failures, pool exhaustion or timeouts, and a busy or
/// locked database. Distinct from client-facing errors; callers may retry.
#[derive(Debug)]
pub(super) struct StoreUnavailableError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for StoreUnavailableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for StoreUnavailableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "store unavailable: {}", self.inner)
    }
}

impl Error {
    /// Creates a store unavailable error.
    pub fn store_unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::StoreUnavailable(StoreUnavailableError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a store unavailable error.
    pub fn is_store_unavailable(&self) -> bool {
        self.kinds().any(|kind| matches!(kind, super::ErrorKind::StoreUnavailable(_)))
    }
}
