use thiserror::Error;

/// Failures of a store operation. The display text is the client-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn invalid_input() -> Self { Self::Validation("Invalid input".into()) }
    pub fn invalid_price() -> Self { Self::Validation("Invalid price".into()) }
    pub fn item_not_found() -> Self { Self::NotFound("Item not found".into()) }
}
