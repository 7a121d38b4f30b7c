/// Repository layer errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("Record not found")]
    NotFound,
    #[error("Unique constraint violation: {message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },
    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    /// True when the error is a unique violation on the named constraint or index.
    pub fn violates(&self, name: &str) -> bool {
        matches!(
            self,
            RepositoryError::UniqueViolation { constraint: Some(c), .. } if c == name
        )
    }
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => RepositoryError::NotFound,
            Error::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => RepositoryError::UniqueViolation {
                        constraint: info.constraint_name().map(str::to_string),
                        message,
                    },
                    DatabaseErrorKind::ForeignKeyViolation => {
                        RepositoryError::ForeignKeyViolation(message)
                    }
                    _ => RepositoryError::Database(message),
                }
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::Pool(err.to_string())
    }
}
