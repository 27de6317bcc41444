use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid amount: {0:?} (expected a non-negative number)")]
    InvalidAmount(String),

    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid kind: {0:?} (expected income or expense)")]
    InvalidKind(String),

    #[error("Invalid essential flag: {0:?} (expected yes or no)")]
    InvalidEssential(String),

    #[error("Transaction not found: {0}")]
    NotFound(u64),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
