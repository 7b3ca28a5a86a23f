//! In-memory query pipeline: filters, then global search, then sort, then
//! paginate. Local tables and in-memory sources both go through here so a
//! remote source is expected to behave the same way.

use std::ops::Range;

use crate::domain::entities::filter::{FilterValue, TextOperator};
use crate::domain::entities::query::{FetchResult, QueryParams};
use crate::domain::entities::row::{CellValue, TableRow};

pub fn matches_filter(cell: &CellValue, value: &FilterValue) -> bool {
    if value.is_empty() {
        return true;
    }
    match value {
        FilterValue::Text(filter) => {
            let haystack = cell.to_string().to_lowercase();
            let needle = filter.text.trim().to_lowercase();
            match filter.operator {
                TextOperator::Include => haystack.contains(&needle),
                TextOperator::Exclude => !haystack.contains(&needle),
                TextOperator::Equal => haystack.trim() == needle,
            }
        }
        FilterValue::Number(filter) => {
            let Ok(target) = filter.value.trim().parse::<f64>() else {
                return true;
            };
            cell.as_number()
                .map(|actual| filter.operator.compare(actual, target))
                .unwrap_or(false)
        }
        FilterValue::NumberRange(range) => {
            let Some(actual) = cell.as_number() else {
                return false;
            };
            let min = range.min.trim().parse::<f64>().ok();
            let max = range.max.trim().parse::<f64>().ok();
            min.map_or(true, |min| actual >= min) && max.map_or(true, |max| actual <= max)
        }
        FilterValue::Select(expected) => cell
            .members()
            .iter()
            .any(|member| member.eq_ignore_ascii_case(expected)),
        FilterValue::MultiSelect(expected) => {
            let members = cell.members();
            members.iter().any(|member| {
                expected
                    .iter()
                    .any(|wanted| member.eq_ignore_ascii_case(wanted))
            })
        }
        FilterValue::Date(expected) => match (cell.as_date(), expected) {
            (Some(actual), Some(expected)) => actual == *expected,
            _ => false,
        },
        FilterValue::DateRange(range) => {
            let Some(actual) = cell.as_date() else {
                return false;
            };
            range.from.map_or(true, |from| actual >= from)
                && range.to.map_or(true, |to| actual <= to)
        }
    }
}

pub fn matches_search<R: TableRow>(row: &R, term: &str) -> bool {
    row.search_text()
        .to_lowercase()
        .contains(&term.to_lowercase())
}

/// Indices into `rows` that pass filters and search, in sorted order.
///
/// Sorting is stable, so ties keep their source order.
pub fn derive_indices<R, F>(rows: &[R], params: &QueryParams, lookup: F) -> Vec<usize>
where
    R: TableRow,
    F: Fn(&R, &str) -> CellValue,
{
    let mut indices = (0..rows.len())
        .filter(|&idx| {
            params
                .filters
                .iter()
                .all(|filter| matches_filter(&lookup(&rows[idx], &filter.id), &filter.value))
        })
        .collect::<Vec<_>>();

    if let Some(term) = params.search_term() {
        indices.retain(|&idx| matches_search(&rows[idx], term));
    }

    if !params.sorting.is_empty() {
        indices.sort_by(|&a, &b| {
            params
                .sorting
                .iter()
                .map(|spec| {
                    let left = lookup(&rows[a], &spec.field);
                    let right = lookup(&rows[b], &spec.field);
                    let ordering = left.compare(&right);
                    if spec.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    indices
}

pub fn page_range(len: usize, params: &QueryParams) -> Range<usize> {
    let start = params.offset().min(len);
    let end = start.saturating_add(params.page_size).min(len);
    start..end
}

pub fn run_query<R, F>(rows: &[R], params: &QueryParams, lookup: F) -> FetchResult<R>
where
    R: TableRow + Clone,
    F: Fn(&R, &str) -> CellValue,
{
    let indices = derive_indices(rows, params, lookup);
    let range = page_range(indices.len(), params);
    FetchResult {
        rows: indices[range].iter().map(|&idx| rows[idx].clone()).collect(),
        total: indices.len(),
    }
}
