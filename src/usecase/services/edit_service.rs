use std::sync::Arc;

use crate::domain::entities::query::RowId;
use crate::usecase::ports::repo::{RepoError, WordRepository};

pub struct EditService {
    repo: Arc<dyn WordRepository>,
}

impl EditService {
    pub fn new(repo: Arc<dyn WordRepository>) -> Self {
        Self { repo }
    }

    /// Deletes the words behind the given row ids. Ids that are not numeric
    /// word ids are ignored.
    pub fn delete_words(&self, ids: &[RowId]) -> Result<usize, RepoError> {
        let word_ids = ids
            .iter()
            .filter_map(|id| id.0.parse::<i64>().ok())
            .collect::<Vec<_>>();
        let deleted = self.repo.delete_words(&word_ids)?;
        log::info!("deleted {deleted} words");
        Ok(deleted)
    }
}
