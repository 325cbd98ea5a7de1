use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed id, missing or out-of-range field. Permanent; maps to 400.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Target id is absent from the store. Maps to 404.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn missing(field: &str) -> Self { Self::InvalidRequest(format!("{} is required", field)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::InvalidRequest(msg),
            ModelError::Db(msg) => ServiceError::Repository(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Repository(e.to_string())
    }
}
