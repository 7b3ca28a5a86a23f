use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::query::{FetchResult, QueryParams};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("data source failed: {0}")]
    Source(String),
    #[error("fetch task did not complete: {0}")]
    Join(String),
}

/// A remote page source. Implementations must return exactly the page named by
/// `params` after applying its filters, search and sorting, with `total`
/// counting all matches before pagination.
#[async_trait]
pub trait RowFetcher<R>: Send + Sync {
    async fn fetch(&self, params: QueryParams) -> Result<FetchResult<R>, FetchError>;
}
