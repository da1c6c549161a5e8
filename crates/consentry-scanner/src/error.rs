use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan cancelled")]
    Cancelled,

    #[error("history error: {0}")]
    History(#[from] consentry_history::HistoryError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
