use kiri_core::Error;
use rusqlite::ErrorCode;

/// Classifies a rusqlite error into a Kiri error category.
pub(crate) fn classify(err: rusqlite::Error) -> Error {
    let code = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => Some(failure.code),
        _ => None,
    };

    match code {
        Some(ErrorCode::ConstraintViolation) => Error::integrity_constraint(err),
        Some(
            ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::CannotOpen
            | ErrorCode::SystemIoFailure
            | ErrorCode::NotADatabase,
        ) => Error::store_unavailable(err),
        _ => Error::driver(err),
    }
}
