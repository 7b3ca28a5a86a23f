use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::entities::query::RowId;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => text.trim().parse::<f64>().ok(),
            CellValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Leading `YYYY-MM-DD` of a text cell, so full ISO timestamps match by day.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Text(text) => {
                let head = text.trim().get(..10)?;
                NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
            }
            _ => None,
        }
    }

    /// Values a select-style filter can match against.
    pub fn members(&self) -> Vec<String> {
        match self {
            CellValue::Null => Vec::new(),
            CellValue::List(items) => items.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Ordering used by sorting; `Null` sorts before everything else.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Null, _) => Ordering::Less,
            (_, CellValue::Null) => Ordering::Greater,
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::List(a), CellValue::List(b)) => a.cmp(b),
            (a, b) => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(flag) => write!(f, "{flag}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        CellValue::List(value)
    }
}

pub trait TableRow {
    /// Explicit identity; rows without one are keyed by position.
    fn row_id(&self) -> Option<String> {
        None
    }

    fn cell(&self, field: &str) -> CellValue;

    /// Text the global search box matches against.
    fn search_text(&self) -> String;
}

pub fn row_identity<R: TableRow>(row: &R, position: usize) -> RowId {
    row.row_id()
        .map(RowId)
        .unwrap_or_else(|| RowId::from(position))
}

/// Describes one displayed column. Order of descriptors is display order.
pub struct ColumnDef<R> {
    pub id: String,
    pub header: String,
    pub accessor: Option<fn(&R) -> CellValue>,
    pub render: Option<fn(&CellValue) -> String>,
    pub width: Option<u32>,
    pub sortable: bool,
}

impl<R: TableRow> ColumnDef<R> {
    pub fn key(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: None,
            render: None,
            width: None,
            sortable: true,
        }
    }

    pub fn derived(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: fn(&R) -> CellValue,
    ) -> Self {
        Self {
            accessor: Some(accessor),
            ..Self::key(id, header)
        }
    }

    pub fn with_render(mut self, render: fn(&CellValue) -> String) -> Self {
        self.render = Some(render);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn value(&self, row: &R) -> CellValue {
        match self.accessor {
            Some(accessor) => accessor(row),
            None => row.cell(&self.id),
        }
    }

    pub fn display(&self, row: &R) -> String {
        let value = self.value(row);
        match self.render {
            Some(render) => render(&value),
            None => value.to_string(),
        }
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor,
            render: self.render,
            width: self.width,
            sortable: self.sortable,
        }
    }
}

impl<R> std::fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("derived", &self.accessor.is_some())
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .finish()
    }
}

impl<R> PartialEq for ColumnDef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.header == other.header
            && self.width == other.width
            && self.sortable == other.sortable
            && self.accessor.is_some() == other.accessor.is_some()
    }
}

/// Value lookup shared by local derivation: derived columns first, raw fields otherwise.
pub fn lookup_value<R: TableRow>(columns: &[ColumnDef<R>], row: &R, field: &str) -> CellValue {
    columns
        .iter()
        .find(|column| column.id == field)
        .map(|column| column.value(row))
        .unwrap_or_else(|| row.cell(field))
}
