use crate::domain::error::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("import aborted after {inserted} book(s): {source}")]
    ImportAborted {
        inserted: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
