use super::EntityKind;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors raised by catalog repositories and services.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("ID does not belong to existing {kind}")]
    NotFound { kind: EntityKind, id: i32 },

    #[error("{} with Id: {id} does not exist. You should create the {kind} first", .kind.title())]
    MissingAssociation { kind: EntityKind, id: i32 },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Database(String),

    #[error("Image storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    #[must_use]
    pub const fn not_found(kind: EntityKind, id: i32) -> Self {
        Self::NotFound { kind, id }
    }

    #[must_use]
    pub const fn missing_association(kind: EntityKind, id: i32) -> Self {
        Self::MissingAssociation { kind, id }
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let err = CatalogError::not_found(EntityKind::Movie, 7);
        assert_eq!(err.to_string(), "ID does not belong to existing movie");
    }

    #[test]
    fn missing_association_message_names_the_id() {
        let err = CatalogError::missing_association(EntityKind::Character, 42);
        assert_eq!(
            err.to_string(),
            "Character with Id: 42 does not exist. You should create the character first"
        );
    }

    #[test]
    fn plain_db_errors_become_database_errors() {
        let err: CatalogError = DbErr::Custom("connection reset".to_string()).into();
        assert!(matches!(err, CatalogError::Database(ref m) if m.contains("connection reset")));
    }
}
