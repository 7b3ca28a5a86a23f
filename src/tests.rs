use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::domain::entities::filter::{FilterValue, NumberRangeFilter, TextFilter, TextOperator};
use crate::domain::entities::query::{ColumnFilter, QueryParams, RowId, SortSpec};
use crate::domain::entities::row::TableRow;
use crate::domain::entities::word::{demo_words, Difficulty, NewWord, WordEntry};
use crate::infra::import::csv::import_words_csv;
use crate::infra::sqlite::queries::{
    count_words, delete_words, insert_words, query_words, seed_demo_words,
};
use crate::infra::sqlite::repo::SqliteWordRepo;
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::fetcher::RowFetcher;
use crate::usecase::ports::repo::WordRepository;
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::pipeline::run_query;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::table::{
    FetchTicket, TableAction, TableEffect, TableOptions, TableOrchestrator,
};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("vocab-admin-{prefix}-{nanos}"))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
}

fn word(word: &str, difficulty: Difficulty, tags: &[&str], created_at: &str, progress: i64) -> NewWord {
    NewWord {
        word: word.to_string(),
        meaning: format!("meaning of {word}"),
        difficulty,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        created_at: created_at.to_string(),
        favorite: false,
        progress,
    }
}

fn sample_words() -> Vec<NewWord> {
    vec![
        word("abate", Difficulty::Easy, &["verb"], "2024-01-01", 10),
        word("benevolent", Difficulty::Hard, &["adjective", "formal"], "2024-01-02", 80),
        word("candid", Difficulty::Medium, &["adjective"], "2024-01-03", 45),
        word("daunt", Difficulty::Hard, &["verb"], "2024-01-03", 45),
        word("50%_off", Difficulty::Easy, &["phrasal"], "2024-01-05", 0),
    ]
}

fn seeded_db(prefix: &str, words: &[NewWord]) -> (PathBuf, PathBuf) {
    let temp_dir = unique_test_dir(prefix);
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("words.sqlite3");
    init_db(&db_path).expect("init_db should succeed");
    insert_words(&db_path, words).expect("insert should succeed");
    (temp_dir, db_path)
}

fn words_of(rows: &[WordEntry]) -> Vec<&str> {
    rows.iter().map(|row| row.word.as_str()).collect()
}

fn filter(id: &str, value: FilterValue) -> ColumnFilter {
    ColumnFilter {
        id: id.to_string(),
        value,
    }
}

#[test]
fn init_db_creates_word_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("nested").join("words.sqlite3");

    let result = init_db(&db_path);
    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'word'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn query_words_filters_sorts_and_pages() {
    let (temp_dir, db_path) = seeded_db("query-words", &sample_words());

    let mut params = QueryParams::first_page(2);
    params.sorting = vec![SortSpec::desc("progress")];
    let first = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(first.total, 5);
    assert_eq!(words_of(&first.rows), vec!["benevolent", "candid"]);

    params.page_index = 1;
    let second = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(words_of(&second.rows), vec!["daunt", "abate"]);

    let mut params = QueryParams::first_page(10);
    params.filters = vec![filter("difficulty", FilterValue::Select("hard".to_string()))];
    let hard = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(hard.total, 2);
    assert_eq!(words_of(&hard.rows), vec!["benevolent", "daunt"]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn query_words_matches_tags_dates_and_ranges() {
    let (temp_dir, db_path) = seeded_db("query-kinds", &sample_words());

    let mut params = QueryParams::first_page(10);
    params.filters = vec![filter(
        "tags",
        FilterValue::MultiSelect(vec!["formal".to_string(), "phrasal".to_string()]),
    )];
    let tagged = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(words_of(&tagged.rows), vec!["benevolent", "50%_off"]);

    params.filters = vec![filter(
        "createdAt",
        FilterValue::Date(NaiveDate::from_ymd_opt(2024, 1, 3)),
    )];
    let dated = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(words_of(&dated.rows), vec!["candid", "daunt"]);

    params.filters = vec![filter(
        "progress",
        FilterValue::NumberRange(NumberRangeFilter {
            min: "40".to_string(),
            max: "50".to_string(),
        }),
    )];
    let ranged = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(ranged.total, 2);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn query_words_search_treats_wildcards_literally() {
    let (temp_dir, db_path) = seeded_db("query-search", &sample_words());

    let mut params = QueryParams::first_page(10);
    params.global_filter = Some("%_".to_string());
    let literal = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(words_of(&literal.rows), vec!["50%_off"]);

    params.global_filter = Some("ADJECTIVE".to_string());
    let by_tag = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(by_tag.total, 2);

    params.filters = vec![filter(
        "word",
        FilterValue::Text(TextFilter {
            operator: TextOperator::Exclude,
            text: "cand".to_string(),
        }),
    )];
    let excluded = query_words(&db_path, &params).expect("query should succeed");
    assert_eq!(words_of(&excluded.rows), vec!["benevolent"]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn query_words_rejects_unknown_fields() {
    let (temp_dir, db_path) = seeded_db("query-unknown", &sample_words());

    let mut params = QueryParams::first_page(10);
    params.sorting = vec![SortSpec::asc("word; DROP TABLE word")];
    assert!(query_words(&db_path, &params).is_err());

    let mut params = QueryParams::first_page(10);
    params.filters = vec![filter("secret", FilterValue::Select("x".to_string()))];
    assert!(query_words(&db_path, &params).is_err());

    assert_eq!(count_words(&db_path).expect("count should succeed"), 5);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn store_and_in_memory_pipeline_agree() {
    let words = demo_words(60, today());
    let (temp_dir, db_path) = seeded_db("parity", &words);
    let entries = words
        .into_iter()
        .zip(1..)
        .map(|(word, id)| word.into_entry(id))
        .collect::<Vec<_>>();

    let mut queries = Vec::new();
    let mut by_progress = QueryParams::first_page(7);
    by_progress.page_index = 2;
    by_progress.sorting = vec![SortSpec::desc("progress")];
    queries.push(by_progress);

    let mut by_difficulty = QueryParams::first_page(10);
    by_difficulty.filters = vec![filter("difficulty", FilterValue::Select("medium".to_string()))];
    by_difficulty.sorting = vec![SortSpec::asc("createdAt")];
    queries.push(by_difficulty);

    let mut by_tag = QueryParams::first_page(5);
    by_tag.filters = vec![filter("tags", FilterValue::MultiSelect(vec!["noun".to_string()]))];
    by_tag.global_filter = Some("a".to_string());
    queries.push(by_tag);

    for params in &queries {
        let stored = query_words(&db_path, params).expect("query should succeed");
        let local = run_query(&entries, params, |row, field| row.cell(field));
        assert_eq!(stored.total, local.total, "totals differ for {params:?}");
        let stored_ids = stored.rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let local_ids = local.rows.iter().map(|row| row.id).collect::<Vec<_>>();
        assert_eq!(stored_ids, local_ids, "pages differ for {params:?}");
    }

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn seeding_only_fills_an_empty_store() {
    let temp_dir = unique_test_dir("seed");
    let db_path = temp_dir.join("words.sqlite3");

    let seeded = seed_demo_words(&db_path, &demo_words(12, today())).expect("seed should succeed");
    assert_eq!(seeded, 12);
    let again = seed_demo_words(&db_path, &demo_words(12, today())).expect("seed should succeed");
    assert_eq!(again, 0);
    assert_eq!(count_words(&db_path).expect("count should succeed"), 12);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_import_appends_rows_and_skips_blank_words() {
    let (temp_dir, db_path) = seeded_db("csv-import", &sample_words());
    let csv_path = temp_dir.join("words.csv");
    fs::write(
        &csv_path,
        "Word,Meaning,Difficulty,Tags,CreatedAt,Favorite,Progress\n\
         ephemeral,short-lived,hard,adjective;formal,2024-02-01,yes,130\n\
         ,orphan meaning,easy,,2024-02-02,no,5\n\
         fathom,understand,medium,verb,2024-02-03,0,20\n",
    )
    .expect("should write csv");

    let summary = import_words_csv(&db_path, &csv_path).expect("import should succeed");
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 1);

    let mut params = QueryParams::first_page(10);
    params.filters = vec![filter("word", FilterValue::Text(TextFilter {
        operator: TextOperator::Equal,
        text: "ephemeral".to_string(),
    }))];
    let found = query_words(&db_path, &params).expect("query should succeed");
    let entry = found.rows.first().expect("imported word should be queryable");
    assert!(entry.favorite);
    assert_eq!(entry.progress, 100);
    assert_eq!(entry.tags, vec!["adjective".to_string(), "formal".to_string()]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn delete_words_removes_only_the_given_ids() {
    let (temp_dir, db_path) = seeded_db("delete", &sample_words());

    let deleted = delete_words(&db_path, &[1, 3, 999]).expect("delete should succeed");
    assert_eq!(deleted, 2);

    let remaining = query_words(&db_path, &QueryParams::first_page(10)).expect("query should succeed");
    assert_eq!(words_of(&remaining.rows), vec!["benevolent", "daunt", "50%_off"]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn edit_service_deletes_selected_row_ids() {
    let (temp_dir, db_path) = seeded_db("edit-service", &sample_words());
    let repo: Arc<dyn WordRepository> = Arc::new(SqliteWordRepo::new(db_path.clone()));
    let service = EditService::new(repo.clone());

    let ids = vec![RowId::from("2"), RowId::from("not-a-number"), RowId::from("4")];
    let deleted = service.delete_words(&ids).expect("delete should succeed");
    assert_eq!(deleted, 2);
    assert_eq!(repo.count_words().expect("count should succeed"), 3);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

fn fetch_from_store(
    table: &mut TableOrchestrator<WordEntry>,
    db_path: &std::path::Path,
    effect: TableEffect,
) {
    let TableEffect::Fetch(FetchTicket { seq, params }) = effect else {
        panic!("expected a fetch to be issued");
    };
    let result = query_words(db_path, &params).map_err(|err| {
        crate::usecase::ports::fetcher::FetchError::Source(err.to_string())
    });
    assert!(table.complete_fetch(seq, result));
}

#[test]
fn deleting_after_paging_only_touches_rows_still_on_screen() {
    let (temp_dir, db_path) = seeded_db("delete-after-paging", &sample_words());
    let service = EditService::new(Arc::new(SqliteWordRepo::new(db_path.clone())));
    let options = TableOptions {
        page_size: 3,
        ..TableOptions::default()
    };
    let mut table = TableOrchestrator::remote(Vec::new(), Vec::new(), options);

    let first = table.refresh();
    fetch_from_store(&mut table, &db_path, first);
    table.dispatch(TableAction::SelectAllVisible(true));
    assert_eq!(table.selected_count(), 3);

    let next = table.dispatch(TableAction::NextPage);
    fetch_from_store(&mut table, &db_path, next);

    let deleted = service
        .delete_words(&table.selected_ids())
        .expect("delete should succeed");
    assert_eq!(deleted, 0, "rows from the previous page must not be deleted");
    assert_eq!(count_words(&db_path).expect("count should succeed"), 5);

    table.dispatch(TableAction::SelectAllVisible(true));
    let deleted = service
        .delete_words(&table.selected_ids())
        .expect("delete should succeed");
    assert_eq!(deleted, 2);
    let remaining = query_words(&db_path, &QueryParams::first_page(10)).expect("query should succeed");
    assert_eq!(words_of(&remaining.rows), vec!["abate", "benevolent", "candid"]);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[tokio::test]
async fn query_service_fetches_pages_from_the_store() {
    let (temp_dir, db_path) = seeded_db("query-service", &sample_words());
    let service = QueryService::new(Arc::new(SqliteWordRepo::new(db_path.clone())));

    let mut params = QueryParams::first_page(3);
    params.sorting = vec![SortSpec::asc("word")];
    let result = service.fetch(params).await.expect("fetch should succeed");
    assert_eq!(result.total, 5);
    assert_eq!(words_of(&result.rows), vec!["50%_off", "abate", "benevolent"]);

    let mut bad = QueryParams::first_page(3);
    bad.sorting = vec![SortSpec::asc("nope")];
    let err = service.fetch(bad).await.expect_err("unknown sort field should fail");
    assert!(err.to_string().contains("nope"), "unexpected error: {err}");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
