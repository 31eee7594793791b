//! Error types for database operations.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Which table constraint the database rejected a statement for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// A referenced parent row does not exist.
    ForeignKey,
    /// A `CHECK` constraint failed (`quantity > 0`, `rating BETWEEN 1 AND 5`).
    Check,
    /// A `UNIQUE` or primary key constraint failed (duplicate email,
    /// repeated `(order_id, product_id)`).
    Unique,
    /// A `NOT NULL` column received `NULL`.
    NotNull,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ForeignKey => "foreign key",
            Self::Check => "check",
            Self::Unique => "unique",
            Self::NotNull => "not null",
        })
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The statement violated a table constraint.
    #[error("{kind} constraint violation{}", constraint_suffix(.constraint))]
    Constraint {
        /// Class of constraint.
        kind: ConstraintKind,
        /// Constraint name reported by the server, when available.
        constraint: Option<String>,
    },

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|name| format!(" ({name})"))
        .unwrap_or_default()
}

impl RepositoryError {
    /// The constraint class, if this error is a constraint violation.
    #[must_use]
    pub const fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::Constraint { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let kind = match db_err.kind() {
                ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                _ => None,
            };
            if let Some(kind) = kind {
                return Self::Constraint {
                    kind,
                    constraint: db_err.constraint().map(str::to_owned),
                };
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
        assert_eq!(err.constraint_kind(), None);
    }

    #[test]
    fn test_constraint_display() {
        let err = RepositoryError::Constraint {
            kind: ConstraintKind::Check,
            constraint: Some("order_items_quantity_check".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "check constraint violation (order_items_quantity_check)"
        );

        let err = RepositoryError::Constraint {
            kind: ConstraintKind::ForeignKey,
            constraint: None,
        };
        assert_eq!(err.to_string(), "foreign key constraint violation");
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::ForeignKey));
    }
}
