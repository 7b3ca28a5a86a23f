use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::query::{FetchResult, QueryParams};
use crate::domain::entities::word::WordEntry;
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::ports::fetcher::{FetchError, RowFetcher};
use crate::usecase::ports::repo::WordRepository;

/// Remote source backed by the word repository.
pub struct QueryService {
    repo: Arc<dyn WordRepository>,
}

impl QueryService {
    pub fn new(repo: Arc<dyn WordRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RowFetcher<WordEntry> for QueryService {
    async fn fetch(&self, params: QueryParams) -> Result<FetchResult<WordEntry>, FetchError> {
        let repo = Arc::clone(&self.repo);
        run_blocking(move || repo.query_words(&params))
            .await?
            .map_err(|err| FetchError::Source(err.to_string()))
    }
}
