use crate::usecase::ports::fetcher::FetchError;

/// Runs `f` on tokio's blocking pool so SQLite work stays off the UI thread.
pub async fn run_blocking<F, T>(f: F) -> Result<T, FetchError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| FetchError::Join(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_closure_result() {
        let value = run_blocking(|| 6 * 7).await.expect("blocking task should run");
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn panics_surface_as_join_errors() {
        let err = run_blocking(|| -> i32 { panic!("boom") })
            .await
            .expect_err("panicking task should fail");
        assert!(matches!(err, FetchError::Join(_)));
    }
}
