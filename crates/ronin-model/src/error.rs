use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid tenant mnemonic: {0:?}")]
    InvalidTenantMnemonic(String),
    #[error("expected a {expected} resource, found {found}")]
    UnexpectedResourceType { expected: String, found: String },
    #[error("invalid resource json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
