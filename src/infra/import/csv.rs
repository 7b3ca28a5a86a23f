use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

use crate::domain::entities::word::{split_tags, Difficulty, NewWord};
use crate::infra::sqlite::queries::insert_words;
use crate::infra::sqlite::schema::init_db;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Column positions resolved from the header row by name, case-insensitively.
struct WordColumns {
    word: usize,
    meaning: Option<usize>,
    difficulty: Option<usize>,
    tags: Option<usize>,
    created_at: Option<usize>,
    favorite: Option<usize>,
    progress: Option<usize>,
}

impl WordColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|header| {
                names
                    .iter()
                    .any(|name| header.trim().eq_ignore_ascii_case(name))
            })
        };
        let word = find(&["word"]).context("csv header must contain a `word` column")?;
        Ok(Self {
            word,
            meaning: find(&["meaning"]),
            difficulty: find(&["difficulty"]),
            tags: find(&["tags"]),
            created_at: find(&["created_at", "createdAt"]),
            favorite: find(&["favorite"]),
            progress: find(&["progress"]),
        })
    }
}

fn field<'a>(record: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|idx| record.get(idx)).unwrap_or("").trim()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

/// Maps one record to a word; records with a blank `word` cell yield `None`.
fn record_to_word(record: &StringRecord, columns: &WordColumns, today: &str) -> Option<NewWord> {
    let word = field(record, Some(columns.word));
    if word.is_empty() {
        return None;
    }
    let created_at = field(record, columns.created_at);
    Some(NewWord {
        word: word.to_string(),
        meaning: field(record, columns.meaning).to_string(),
        difficulty: Difficulty::parse_lenient(field(record, columns.difficulty)),
        tags: split_tags(field(record, columns.tags)),
        created_at: if created_at.is_empty() {
            today.to_string()
        } else {
            created_at.to_string()
        },
        favorite: parse_flag(field(record, columns.favorite)),
        progress: field(record, columns.progress)
            .parse::<i64>()
            .unwrap_or(0)
            .clamp(0, 100),
    })
}

pub fn read_words_csv(csv_path: &Path) -> Result<(Vec<NewWord>, usize)> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }
    let columns = WordColumns::from_headers(&headers)?;
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut words = Vec::new();
    let mut skipped = 0;
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        match record_to_word(&record, &columns, &today) {
            Some(word) => words.push(word),
            None => skipped += 1,
        }
    }
    Ok((words, skipped))
}

pub fn import_words_csv(db_path: &Path, csv_path: &Path) -> Result<ImportSummary> {
    init_db(db_path)?;
    let (words, skipped) = read_words_csv(csv_path)?;
    let inserted = insert_words(db_path, &words)?;
    Ok(ImportSummary { inserted, skipped })
}
