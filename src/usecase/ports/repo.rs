use thiserror::Error;

use crate::domain::entities::query::{FetchResult, QueryParams};
use crate::domain::entities::word::{NewWord, WordEntry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for RepoError {
    fn from(err: anyhow::Error) -> Self {
        RepoError::Message(format!("{err:#}"))
    }
}

pub trait WordRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn query_words(&self, params: &QueryParams) -> Result<FetchResult<WordEntry>, RepoError>;
    fn count_words(&self) -> Result<usize, RepoError>;
    fn insert_words(&self, words: &[NewWord]) -> Result<usize, RepoError>;
    fn delete_words(&self, ids: &[i64]) -> Result<usize, RepoError>;
    /// Inserts `words` only when the store is empty.
    fn seed_demo_words(&self, words: &[NewWord]) -> Result<usize, RepoError>;
}
