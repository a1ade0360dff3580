use crate::store::StoreError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Duplicate file: {0}")]
    DuplicateFile(String),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
