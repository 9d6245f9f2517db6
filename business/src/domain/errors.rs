/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    /// The record exists but does not list the addressed item.
    #[error("repository.item_not_found")]
    ItemNotFound,
    #[error("repository.persistence")]
    Persistence,
    #[error("repository.database_error")]
    DatabaseError,
}
