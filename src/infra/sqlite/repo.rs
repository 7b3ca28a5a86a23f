use std::path::PathBuf;

use crate::domain::entities::query::{FetchResult, QueryParams};
use crate::domain::entities::word::{NewWord, WordEntry};
use crate::infra::sqlite::queries::{
    count_words, delete_words, insert_words, query_words, seed_demo_words,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{RepoError, WordRepository};

pub struct SqliteWordRepo {
    pub db_path: PathBuf,
}

impl SqliteWordRepo {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl WordRepository for SqliteWordRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(RepoError::from)
    }

    fn query_words(&self, params: &QueryParams) -> Result<FetchResult<WordEntry>, RepoError> {
        query_words(&self.db_path, params).map_err(RepoError::from)
    }

    fn count_words(&self) -> Result<usize, RepoError> {
        count_words(&self.db_path).map_err(RepoError::from)
    }

    fn insert_words(&self, words: &[NewWord]) -> Result<usize, RepoError> {
        insert_words(&self.db_path, words).map_err(RepoError::from)
    }

    fn delete_words(&self, ids: &[i64]) -> Result<usize, RepoError> {
        delete_words(&self.db_path, ids).map_err(RepoError::from)
    }

    fn seed_demo_words(&self, words: &[NewWord]) -> Result<usize, RepoError> {
        seed_demo_words(&self.db_path, words).map_err(RepoError::from)
    }
}
