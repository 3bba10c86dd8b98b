use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("forbidden access")]
    Forbidden,
    #[error("database error: {0}")]
    Db(String),
}
