use gitype_domain::LoadError;
use gitype_service::ReloadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitypeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load data: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to update data: {0}")]
    Reload(#[from] ReloadError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for GitypeError {
    fn from(err: String) -> Self {
        GitypeError::Internal(err)
    }
}

pub type Result<T> = std::result::Result<T, GitypeError>;
