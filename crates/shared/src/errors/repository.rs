use sqlx::Error as SqlxError;
use thiserror::Error;

// serialization_failure, deadlock_detected, lock_not_available, check_violation
fn is_conflict_sqlstate(code: &str) -> bool {
    matches!(code, "40001" | "40P01" | "55P03" | "23514")
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(
        "Insufficient stock for product {product_id}: requested={requested}, available={available}"
    )]
    InsufficientStock {
        product_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict(_))
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        let conflict_code = err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .filter(|code| is_conflict_sqlstate(code))
            .map(|code| code.into_owned());

        match conflict_code {
            Some(code) => RepositoryError::Conflict(format!("sqlstate {code}: {err}")),
            None => match err {
                SqlxError::RowNotFound => RepositoryError::NotFound,
                other => RepositoryError::Sqlx(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = RepositoryError::from(SqlxError::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn pool_timeout_stays_a_storage_error() {
        let err = RepositoryError::from(SqlxError::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Sqlx(_)));
        assert!(!err.is_conflict());
    }
}
