use gitype_domain::LoadError;
use thiserror::Error;

/// 重新加载数据时的错误
#[derive(Error, Debug)]
pub enum ReloadError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Reload requested too frequently")]
    TooFrequent,

    #[error("Another reload is in progress")]
    InProgress,

    #[error("Failed to update data source: {0}")]
    Update(String),

    #[error("Reload task failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for ReloadError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReloadError::Join(err.to_string())
    }
}
