use melody_core::types::ContentFilter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// The filter matched no stored rows.
    #[error("no content found for {0}")]
    NotFound(ContentFilter),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
