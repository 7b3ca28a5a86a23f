use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::import::csv::{import_words_csv, ImportSummary};

pub struct ImportService {
    db_path: PathBuf,
}

impl ImportService {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn import_csv(&self, path: &Path) -> Result<ImportSummary> {
        let summary = import_words_csv(&self.db_path, path)?;
        log::info!(
            "imported {} words from {} ({} skipped)",
            summary.inserted,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }
}
