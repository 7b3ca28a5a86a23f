use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, types::Value};

use crate::domain::entities::filter::{FilterValue, TextOperator};
use crate::domain::entities::query::{FetchResult, QueryParams};
use crate::domain::entities::word::{split_tags, Difficulty, NewWord, WordEntry};
use crate::infra::sqlite::schema::{init_db, open_connection};

const WORD_COLUMNS: &str = "id, word, meaning, difficulty, tags, created_at, favorite, progress";

/// SQL expression for a queryable field. Anything outside this list is
/// rejected rather than interpolated.
fn field_expr(field: &str) -> Result<&'static str> {
    Ok(match field {
        "id" => "id",
        "word" => "word",
        "meaning" => "meaning",
        "difficulty" => "difficulty",
        "tags" => "tags",
        "createdAt" => "created_at",
        "favorite" => "(CASE WHEN favorite <> 0 THEN 'true' ELSE 'false' END)",
        "progress" => "progress",
        other => anyhow::bail!("unknown word field: {other}"),
    })
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[derive(Default)]
struct WhereClause {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl WhereClause {
    fn push(&mut self, clause: String, params: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause);
        self.params.extend(params);
    }

    fn tag_membership(tag: &str) -> (String, Value) {
        (
            "(',' || tags || ',') LIKE ? ESCAPE '\\'".to_string(),
            Value::Text(like_pattern(&format!(",{},", tag.trim()))),
        )
    }

    fn add_filter(&mut self, field: &str, value: &FilterValue) -> Result<()> {
        let expr = field_expr(field)?;
        if value.is_empty() {
            return Ok(());
        }
        match value {
            FilterValue::Text(filter) => {
                let needle = filter.text.trim().to_lowercase();
                match filter.operator {
                    TextOperator::Include => self.push(
                        format!("LOWER({expr}) LIKE ? ESCAPE '\\'"),
                        [Value::Text(like_pattern(&needle))],
                    ),
                    TextOperator::Exclude => self.push(
                        format!("LOWER({expr}) NOT LIKE ? ESCAPE '\\'"),
                        [Value::Text(like_pattern(&needle))],
                    ),
                    TextOperator::Equal => {
                        self.push(format!("LOWER(TRIM({expr})) = ?"), [Value::Text(needle)])
                    }
                }
            }
            FilterValue::Number(filter) => {
                if let Ok(target) = filter.value.trim().parse::<f64>() {
                    self.push(
                        format!("CAST({expr} AS REAL) {} ?", filter.operator.as_str()),
                        [Value::Real(target)],
                    );
                }
            }
            FilterValue::NumberRange(range) => {
                if let Ok(min) = range.min.trim().parse::<f64>() {
                    self.push(format!("CAST({expr} AS REAL) >= ?"), [Value::Real(min)]);
                }
                if let Ok(max) = range.max.trim().parse::<f64>() {
                    self.push(format!("CAST({expr} AS REAL) <= ?"), [Value::Real(max)]);
                }
            }
            FilterValue::Select(expected) if field == "tags" => {
                let (clause, param) = Self::tag_membership(expected);
                self.push(clause, [param]);
            }
            FilterValue::Select(expected) => self.push(
                format!("LOWER({expr}) = ?"),
                [Value::Text(expected.to_lowercase())],
            ),
            FilterValue::MultiSelect(expected) if field == "tags" => {
                let (clauses, params): (Vec<_>, Vec<_>) =
                    expected.iter().map(|tag| Self::tag_membership(tag)).unzip();
                self.push(format!("({})", clauses.join(" OR ")), params);
            }
            FilterValue::MultiSelect(expected) => {
                let placeholders = vec!["?"; expected.len()].join(", ");
                self.push(
                    format!("LOWER({expr}) IN ({placeholders})"),
                    expected.iter().map(|v| Value::Text(v.to_lowercase())),
                );
            }
            FilterValue::Date(Some(day)) => self.push(
                format!("substr({expr}, 1, 10) = ?"),
                [Value::Text(day.format("%Y-%m-%d").to_string())],
            ),
            FilterValue::Date(None) => {}
            FilterValue::DateRange(range) => {
                if let Some(from) = range.from {
                    self.push(
                        format!("substr({expr}, 1, 10) >= ?"),
                        [Value::Text(from.format("%Y-%m-%d").to_string())],
                    );
                }
                if let Some(to) = range.to {
                    self.push(
                        format!("substr({expr}, 1, 10) <= ?"),
                        [Value::Text(to.format("%Y-%m-%d").to_string())],
                    );
                }
            }
        }
        Ok(())
    }

    fn add_search(&mut self, term: &str) {
        let pattern = Value::Text(like_pattern(&term.to_lowercase()));
        let clause = ["word", "meaning", "tags", "difficulty"]
            .iter()
            .map(|column| format!("LOWER({column}) LIKE ? ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.push(format!("({clause})"), std::iter::repeat_n(pattern, 4));
    }

    fn sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }
}

fn read_word(row: &rusqlite::Row<'_>) -> rusqlite::Result<WordEntry> {
    let difficulty: String = row.get(3)?;
    let tags: String = row.get(4)?;
    let favorite: i64 = row.get(6)?;
    Ok(WordEntry {
        id: row.get(0)?,
        word: row.get(1)?,
        meaning: row.get(2)?,
        difficulty: Difficulty::parse_lenient(&difficulty),
        tags: split_tags(&tags),
        created_at: row.get(5)?,
        favorite: favorite != 0,
        progress: row.get(7)?,
    })
}

/// Runs the table query contract against the word table: filters and search,
/// then ordering with an `id` tiebreak, then one page.
pub fn query_words(db_path: &Path, query: &QueryParams) -> Result<FetchResult<WordEntry>> {
    if query.page_size == 0 {
        anyhow::bail!("page_size must be greater than zero")
    }

    let mut filter = WhereClause::default();
    for column_filter in &query.filters {
        filter.add_filter(&column_filter.id, &column_filter.value)?;
    }
    if let Some(term) = query.search_term() {
        filter.add_search(term);
    }

    let mut order_terms = Vec::new();
    for spec in &query.sorting {
        let direction = if spec.descending { "DESC" } else { "ASC" };
        order_terms.push(format!("{} {direction}", field_expr(&spec.field)?));
    }
    order_terms.push("id ASC".to_string());

    let conn = open_connection(db_path)?;
    let where_sql = filter.sql();

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM word {where_sql}"),
            rusqlite::params_from_iter(filter.params.iter().cloned()),
            |row| row.get(0),
        )
        .context("failed to query filtered word count")?;

    let page_sql = format!(
        "SELECT {WORD_COLUMNS} FROM word {where_sql} ORDER BY {} LIMIT ? OFFSET ?",
        order_terms.join(", ")
    );
    let mut page_params = filter.params;
    page_params.push(Value::Integer(query.page_size as i64));
    page_params.push(Value::Integer(query.offset() as i64));

    let mut stmt = conn
        .prepare(&page_sql)
        .context("failed to prepare word page query")?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(page_params), read_word)
        .context("failed to query word page")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect word page")?;

    Ok(FetchResult {
        rows,
        total: total as usize,
    })
}

pub fn count_words(db_path: &Path) -> Result<usize> {
    let conn = open_connection(db_path)?;
    let total: i64 = conn
        .query_row("SELECT COUNT(*) FROM word", [], |row| row.get(0))
        .context("failed to count words")?;
    Ok(total as usize)
}

pub fn insert_words(db_path: &Path, words: &[NewWord]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn.transaction().context("failed to start transaction")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO word(word, meaning, difficulty, tags, created_at, favorite, progress)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .context("failed to prepare word insert")?;

    for word in words {
        insert_stmt
            .execute(params![
                word.word,
                word.meaning,
                word.difficulty.as_str(),
                word.tags.join(","),
                word.created_at,
                word.favorite as i64,
                word.progress,
            ])
            .with_context(|| format!("failed to insert word: {}", word.word))?;
    }
    drop(insert_stmt);

    tx.commit().context("failed to commit word insert")?;
    Ok(words.len())
}

pub fn delete_words(db_path: &Path, ids: &[i64]) -> Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    let conn = open_connection(db_path)?;
    let placeholders = vec!["?"; ids.len()].join(", ");
    let deleted = conn
        .execute(
            &format!("DELETE FROM word WHERE id IN ({placeholders})"),
            rusqlite::params_from_iter(ids.iter()),
        )
        .context("failed to delete words")?;
    Ok(deleted)
}

/// Fills an empty word table with demo rows. Returns how many were inserted.
pub fn seed_demo_words(db_path: &Path, words: &[NewWord]) -> Result<usize> {
    init_db(db_path)?;
    if count_words(db_path)? > 0 {
        return Ok(0);
    }
    insert_words(db_path, words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_rejected() {
        let err = field_expr("word; DROP TABLE word").expect_err("field should be rejected");
        assert!(err.to_string().contains("unknown word field"));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_a"), "%50\\%\\_a%");
    }

    #[test]
    fn empty_filters_add_no_clause() {
        let mut clause = WhereClause::default();
        clause
            .add_filter("tags", &FilterValue::MultiSelect(Vec::new()))
            .expect("known field");
        clause
            .add_filter("createdAt", &FilterValue::Date(None))
            .expect("known field");
        assert_eq!(clause.sql(), "");
    }

    #[test]
    fn tag_filters_match_whole_members() {
        let mut clause = WhereClause::default();
        clause
            .add_filter(
                "tags",
                &FilterValue::MultiSelect(vec!["verb".to_string(), "noun".to_string()]),
            )
            .expect("known field");
        assert_eq!(clause.clauses.len(), 1);
        assert!(clause.clauses[0].contains(" OR "));
        assert_eq!(clause.params[0], Value::Text("%,verb,%".to_string()));
    }
}
