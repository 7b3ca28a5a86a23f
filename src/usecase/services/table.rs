//! Table orchestrator: owns sorting, filters, pagination, global search and
//! row selection, and reconciles them with either a fixed in-memory row set
//! (local mode) or pages fetched from a [`RowFetcher`](crate::usecase::ports::fetcher::RowFetcher)
//! (remote mode).
//!
//! State changes go in as [`TableAction`]s; anything the caller has to do in
//! response (issue a fetch) comes back as a [`TableEffect`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::domain::entities::filter::{FilterDef, FilterValue};
use crate::domain::entities::query::{ColumnFilter, FetchResult, QueryParams, RowId, SortSpec};
use crate::domain::entities::row::{lookup_value, row_identity, ColumnDef, TableRow};
use crate::usecase::ports::fetcher::FetchError;
use crate::usecase::services::debounce::Debouncer;
use crate::usecase::services::pagination::page_count;
use crate::usecase::services::pipeline::{derive_indices, page_range};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 30, 50];
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction<R> {
    SetSorting(Vec<SortSpec>),
    /// Header button cycle: unsorted, ascending, descending, unsorted.
    ToggleSort(String),
    SetFilters(Vec<ColumnFilter>),
    SetFilter {
        id: String,
        value: Option<FilterValue>,
    },
    ClearFilters,
    SetPage(usize),
    NextPage,
    PreviousPage,
    SetPageSize(usize),
    SetGlobalSearch(String),
    ToggleRow(RowId),
    SelectAllVisible(bool),
    ReplaceData(Vec<R>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub seq: u64,
    pub params: QueryParams,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableEffect {
    None,
    Fetch(FetchTicket),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<R> {
    pub id: RowId,
    pub row: R,
}

pub struct TableOrchestrator<R> {
    columns: Vec<ColumnDef<R>>,
    filter_defs: Vec<FilterDef>,
    mode: Mode,
    data: Vec<R>,
    // Local: every row passing filters and search, sorted. Remote: the fetched page.
    filtered: Vec<VisibleRow<R>>,
    total: usize,
    sorting: Vec<SortSpec>,
    filters: Vec<ColumnFilter>,
    pagination: Pagination,
    global_search: String,
    debounced_search: String,
    search: Debouncer<String>,
    selection: BTreeMap<RowId, bool>,
    issued_seq: u64,
    in_flight: usize,
    last_params: Option<QueryParams>,
    error: Option<FetchError>,
    torn_down: bool,
}

impl<R: TableRow + Clone> TableOrchestrator<R> {
    fn with_mode(
        mode: Mode,
        columns: Vec<ColumnDef<R>>,
        filter_defs: Vec<FilterDef>,
        data: Vec<R>,
        options: TableOptions,
    ) -> Self {
        Self {
            columns,
            filter_defs,
            mode,
            data,
            filtered: Vec::new(),
            total: 0,
            sorting: Vec::new(),
            filters: Vec::new(),
            pagination: Pagination {
                page_index: 0,
                page_size: options.page_size.max(1),
            },
            global_search: String::new(),
            debounced_search: String::new(),
            search: Debouncer::new(options.search_debounce),
            selection: BTreeMap::new(),
            issued_seq: 0,
            in_flight: 0,
            last_params: None,
            error: None,
            torn_down: false,
        }
    }

    pub fn local(
        columns: Vec<ColumnDef<R>>,
        filter_defs: Vec<FilterDef>,
        rows: Vec<R>,
        options: TableOptions,
    ) -> Self {
        let mut table = Self::with_mode(Mode::Local, columns, filter_defs, rows, options);
        table.rederive();
        table
    }

    /// Remote tables start empty; call [`refresh`](Self::refresh) to issue the first fetch.
    pub fn remote(
        columns: Vec<ColumnDef<R>>,
        filter_defs: Vec<FilterDef>,
        options: TableOptions,
    ) -> Self {
        Self::with_mode(Mode::Remote, columns, filter_defs, Vec::new(), options)
    }

    pub fn dispatch(&mut self, action: TableAction<R>) -> TableEffect {
        self.dispatch_at(action, Instant::now())
    }

    pub fn dispatch_at(&mut self, action: TableAction<R>, now: Instant) -> TableEffect {
        match action {
            TableAction::SetSorting(sorting) => {
                self.sorting = sorting;
            }
            TableAction::ToggleSort(field) => {
                if !self.can_sort(&field) {
                    return TableEffect::None;
                }
                self.sorting = match self.sort_direction(&field) {
                    None => vec![SortSpec::asc(field)],
                    Some(false) => vec![SortSpec::desc(field)],
                    Some(true) => Vec::new(),
                };
            }
            TableAction::SetFilters(filters) => {
                self.filters = filters
                    .into_iter()
                    .filter(|filter| !filter.value.is_empty())
                    .collect();
                self.pagination.page_index = 0;
            }
            TableAction::SetFilter { id, value } => {
                self.filters.retain(|filter| filter.id != id);
                if let Some(value) = value.filter(|value| !value.is_empty()) {
                    self.filters.push(ColumnFilter { id, value });
                }
                self.pagination.page_index = 0;
            }
            TableAction::ClearFilters => {
                self.filters.clear();
                self.pagination.page_index = 0;
            }
            TableAction::SetPage(page_index) => {
                self.pagination.page_index = page_index.min(self.page_count() - 1);
            }
            TableAction::NextPage => {
                if !self.can_next_page() {
                    return TableEffect::None;
                }
                self.pagination.page_index += 1;
            }
            TableAction::PreviousPage => {
                if !self.can_previous_page() {
                    return TableEffect::None;
                }
                self.pagination.page_index -= 1;
            }
            TableAction::SetPageSize(page_size) => {
                if page_size == 0 {
                    return TableEffect::None;
                }
                self.pagination = Pagination {
                    page_index: 0,
                    page_size,
                };
            }
            // Nothing derived changes until the term settles in `poll_search`.
            TableAction::SetGlobalSearch(text) => {
                self.global_search = text.clone();
                self.search.push(text, now);
                return TableEffect::None;
            }
            TableAction::ToggleRow(id) => {
                if self.is_selected(&id) {
                    self.selection.remove(&id);
                } else {
                    self.selection.insert(id, true);
                }
                return TableEffect::None;
            }
            TableAction::SelectAllVisible(selected) => {
                self.selection = if selected {
                    self.filtered
                        .iter()
                        .map(|visible| (visible.id.clone(), true))
                        .collect()
                } else {
                    BTreeMap::new()
                };
                return TableEffect::None;
            }
            TableAction::ReplaceData(rows) => {
                if self.mode == Mode::Remote {
                    log::debug!("ignoring local data replacement on a remote table");
                    return TableEffect::None;
                }
                self.data = rows;
            }
        }
        self.reconcile()
    }

    /// Commits the debounced search once it has settled.
    pub fn poll_search(&mut self, now: Instant) -> TableEffect {
        if self.torn_down {
            return TableEffect::None;
        }
        match self.search.poll(now) {
            Some(settled) if settled != self.debounced_search => {
                self.debounced_search = settled;
                self.pagination.page_index = 0;
                self.reconcile()
            }
            _ => TableEffect::None,
        }
    }

    pub fn search_delay(&self) -> Duration {
        self.search.delay()
    }

    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            page_index: self.pagination.page_index,
            page_size: self.pagination.page_size,
            sorting: self.sorting.clone(),
            filters: self.filters.clone(),
            global_filter: Some(self.debounced_search.clone()).filter(|term| !term.is_empty()),
        }
    }

    /// Issues a fetch if the query differs by value from the last one issued.
    pub fn refresh(&mut self) -> TableEffect {
        if self.mode != Mode::Remote || self.torn_down {
            return TableEffect::None;
        }
        let params = self.query_params();
        if self.last_params.as_ref() == Some(&params) {
            return TableEffect::None;
        }
        self.last_params = Some(params.clone());
        self.issued_seq += 1;
        self.in_flight += 1;
        log::debug!(
            "issuing fetch #{} (page {}, size {})",
            self.issued_seq,
            params.page_index,
            params.page_size
        );
        TableEffect::Fetch(FetchTicket {
            seq: self.issued_seq,
            params,
        })
    }

    /// Re-issues the current query even if it has not changed.
    pub fn reload(&mut self) -> TableEffect {
        self.last_params = None;
        self.refresh()
    }

    /// Applies a settled fetch. Only the most recently issued request may
    /// touch the row set; older ones only release the loading flag.
    /// Returns whether the result was applied.
    pub fn complete_fetch(
        &mut self,
        seq: u64,
        result: Result<FetchResult<R>, FetchError>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.torn_down {
            return false;
        }
        if seq != self.issued_seq {
            log::debug!(
                "discarding stale fetch #{seq} (latest #{})",
                self.issued_seq
            );
            return false;
        }
        match result {
            Ok(mut page) => {
                let page_size = self.pagination.page_size;
                if page.rows.len() > page_size {
                    log::warn!(
                        "data source returned {} rows for a page of {page_size}; truncating",
                        page.rows.len()
                    );
                    page.rows.truncate(page_size);
                }
                self.total = page.total.max(page.rows.len());
                self.filtered = page
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(idx, row)| VisibleRow {
                        id: row_identity(row, idx),
                        row: row.clone(),
                    })
                    .collect();
                self.data = page.rows;
                self.error = None;
                log::debug!("applied fetch #{seq}: {} rows of {}", self.data.len(), self.total);
            }
            Err(err) => {
                log::warn!("fetch #{seq} failed: {err}");
                self.data.clear();
                self.filtered.clear();
                self.total = 0;
                self.error = Some(err);
            }
        }
        true
    }

    /// Consumer torn down: late results are ignored and pending search dropped.
    pub fn shutdown(&mut self) {
        self.torn_down = true;
        self.search.cancel();
    }

    fn reconcile(&mut self) -> TableEffect {
        match self.mode {
            Mode::Local => {
                self.rederive();
                TableEffect::None
            }
            Mode::Remote => self.refresh(),
        }
    }

    fn rederive(&mut self) {
        let params = self.query_params();
        let columns = &self.columns;
        let indices = derive_indices(&self.data, &params, |row, field| {
            lookup_value(columns, row, field)
        });
        self.filtered = indices
            .into_iter()
            .map(|idx| VisibleRow {
                id: row_identity(&self.data[idx], idx),
                row: self.data[idx].clone(),
            })
            .collect();
        self.total = self.filtered.len();
        let last_page = self.page_count() - 1;
        if self.pagination.page_index > last_page {
            self.pagination.page_index = last_page;
        }
    }

    fn can_sort(&self, field: &str) -> bool {
        self.columns
            .iter()
            .find(|column| column.id == field)
            .map(|column| column.sortable)
            .unwrap_or(true)
    }

    /// `Some(descending)` if the table is sorted by `field`.
    pub fn sort_direction(&self, field: &str) -> Option<bool> {
        self.sorting
            .iter()
            .find(|spec| spec.field == field)
            .map(|spec| spec.descending)
    }

    /// Source rows: the full dataset locally, the fetched page remotely.
    pub fn rows(&self) -> &[R] {
        &self.data
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[VisibleRow<R>] {
        match self.mode {
            Mode::Local => &self.filtered[page_range(self.filtered.len(), &self.query_params())],
            Mode::Remote => &self.filtered,
        }
    }

    /// Rows eligible for selection: every filtered row locally, the fetched page remotely.
    pub fn filtered_rows(&self) -> &[VisibleRow<R>] {
        &self.filtered
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.get(id).copied().unwrap_or(false)
    }

    /// Selected identities among the current filtered rows; selections for rows
    /// that are no longer present are not reported.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.filtered
            .iter()
            .filter(|visible| self.is_selected(&visible.id))
            .map(|visible| visible.id.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids().len()
    }

    pub fn all_filtered_selected(&self) -> bool {
        !self.filtered.is_empty() && self.filtered.iter().all(|v| self.is_selected(&v.id))
    }

    pub fn some_filtered_selected(&self) -> bool {
        self.filtered.iter().any(|v| self.is_selected(&v.id)) && !self.all_filtered_selected()
    }

    pub fn total_rows(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total, self.pagination.page_size)
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index + 1 < self.page_count()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn sorting(&self) -> &[SortSpec] {
        &self.sorting
    }

    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    pub fn filter_defs(&self) -> &[FilterDef] {
        &self.filter_defs
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    pub fn global_search(&self) -> &str {
        &self.global_search
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Set when the latest fetch failed; the row set is then empty.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }
}

/// Copy of `rows` without the rows whose identity is in `ids`.
pub fn without_rows<R: TableRow + Clone>(rows: &[R], ids: &[RowId]) -> Vec<R> {
    rows.iter()
        .enumerate()
        .filter(|(idx, row)| !ids.contains(&row_identity(*row, *idx)))
        .map(|(_, row)| row.clone())
        .collect()
}
