//! Store errors, reduced to a closed set of kinds that callers can map
//! without inspecting messages.

use thiserror::Error;

/// Classification of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No row matched the requested id.
    NotFound,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// The store could not be reached or the pool is exhausted/closed.
    Unavailable,
    /// Anything else: bad SQL, decode failures, unexpected driver errors.
    Internal,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound(format!("{entity} '{id}' not found"))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Conflict(_) => ErrorKind::Conflict,
            StoreError::Unavailable(_) => ErrorKind::Unavailable,
            StoreError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Translate a driver error, prefixing the message with what was being
    /// attempted (`"error creating book"`).
    pub fn from_sqlx(action: &str, err: sqlx::Error) -> Self {
        let message = format!("{action}: {err}");
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound(message),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(message)
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(message),
            _ => StoreError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = StoreError::from_sqlx("error getting book by id", sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("error getting book by id: "));
    }

    #[test]
    fn pool_failures_map_to_unavailable() {
        let timed_out = StoreError::from_sqlx("error listing books", sqlx::Error::PoolTimedOut);
        let closed = StoreError::from_sqlx("error listing books", sqlx::Error::PoolClosed);
        let io = StoreError::from_sqlx(
            "error listing books",
            sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        );

        assert_eq!(timed_out.kind(), ErrorKind::Unavailable);
        assert_eq!(closed.kind(), ErrorKind::Unavailable);
        assert_eq!(io.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn decode_failures_are_internal() {
        let err = StoreError::from_sqlx(
            "error listing books",
            sqlx::Error::ColumnNotFound("title".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = StoreError::not_found("book", "b1x");
        assert_eq!(err.to_string(), "book 'b1x' not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
