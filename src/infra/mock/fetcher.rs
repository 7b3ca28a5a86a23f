use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::query::{FetchResult, QueryParams};
use crate::domain::entities::row::TableRow;
use crate::usecase::ports::fetcher::{FetchError, RowFetcher};
use crate::usecase::services::pipeline::run_query;

pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(200);

/// In-memory stand-in for a remote source: the shared pipeline plus latency.
pub struct MockFetcher<R> {
    rows: Arc<Vec<R>>,
    latency: Duration,
    failing: bool,
}

impl<R> MockFetcher<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(rows),
            latency: DEFAULT_MOCK_LATENCY,
            failing: false,
        }
    }

    /// A source whose every call errors.
    pub fn failing() -> Self {
        Self {
            rows: Arc::new(Vec::new()),
            latency: DEFAULT_MOCK_LATENCY,
            failing: true,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl<R> RowFetcher<R> for MockFetcher<R>
where
    R: TableRow + Clone + Send + Sync + 'static,
{
    async fn fetch(&self, params: QueryParams) -> Result<FetchResult<R>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing {
            return Err(FetchError::Source("mock data source is unavailable".to_string()));
        }
        Ok(run_query(&self.rows, &params, |row, field| row.cell(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::filter::FilterValue;
    use crate::domain::entities::query::{ColumnFilter, SortSpec};
    use crate::domain::entities::word::{Difficulty, WordEntry};

    fn entry(id: i64, word: &str, difficulty: Difficulty, progress: i64) -> WordEntry {
        WordEntry {
            id,
            word: word.to_string(),
            meaning: format!("meaning of {word}"),
            difficulty,
            tags: vec!["noun".to_string()],
            created_at: format!("2024-01-{id:02}T08:00:00Z"),
            favorite: id % 2 == 0,
            progress,
        }
    }

    fn sample() -> Vec<WordEntry> {
        vec![
            entry(1, "abandon", Difficulty::Hard, 10),
            entry(2, "brisk", Difficulty::Easy, 90),
            entry(3, "candid", Difficulty::Medium, 40),
            entry(4, "dwell", Difficulty::Easy, 70),
            entry(5, "eager", Difficulty::Easy, 20),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn serves_filtered_sorted_pages_after_latency() {
        let fetcher = MockFetcher::new(sample());
        let mut params = QueryParams::first_page(2);
        params.filters = vec![ColumnFilter {
            id: "difficulty".to_string(),
            value: FilterValue::Select("easy".to_string()),
        }];
        params.sorting = vec![SortSpec::desc("progress")];

        let started = tokio::time::Instant::now();
        let page = fetcher.fetch(params).await.expect("mock fetch should succeed");

        assert!(started.elapsed() >= DEFAULT_MOCK_LATENCY);
        assert_eq!(page.total, 3);
        let words = page.rows.iter().map(|w| w.word.as_str()).collect::<Vec<_>>();
        assert_eq!(words, vec!["brisk", "dwell"]);
    }

    #[tokio::test]
    async fn global_search_matches_any_field() {
        let fetcher = MockFetcher::new(sample()).with_latency(Duration::ZERO);
        let mut params = QueryParams::first_page(10);
        params.global_filter = Some("MEANING OF C".to_string());

        let page = fetcher.fetch(params).await.expect("mock fetch should succeed");

        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].id, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_source_reports_an_error() {
        let fetcher = MockFetcher::<WordEntry>::failing();

        let err = fetcher
            .fetch(QueryParams::first_page(10))
            .await
            .expect_err("failing source should error");

        assert!(matches!(err, FetchError::Source(_)));
    }
}
