use dioxus::prelude::*;

use crate::domain::entities::query::RowId;
use crate::domain::entities::row::TableRow;
use crate::ui::components::filters_sheet::FiltersSheet;
use crate::ui::components::page_jump::PageJumpControl;
use crate::ui::state::table_state::TableHandle;
use crate::usecase::services::pagination::{pagination_window, PAGINATION_WINDOW};
use crate::usecase::services::table::TableAction;

const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const ACTIVE_BUTTON_STYLE: &str = "border: 1px solid #4c6ef5; background: #eef4ff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const HEADER_CELL_STYLE: &str = "position: sticky; top: 0; background: #f6f7f9; border-bottom: 1px solid #ddd; padding: 6px 8px; text-align: left; white-space: nowrap;";
const CELL_STYLE: &str = "border-bottom: 1px solid #eee; padding: 6px 8px; vertical-align: top;";

struct RenderedRow {
    id: RowId,
    selected: bool,
    cells: Vec<String>,
}

struct RenderedHeader {
    id: String,
    title: String,
    width: Option<u32>,
    sortable: bool,
    indicator: &'static str,
}

/// Data table over a [`TableHandle`]: global search, filter sheet, sortable
/// headers, optional row selection and pagination controls. Extra toolbar
/// buttons are passed as children.
///
/// `on_row_select` receives the selected ids among the current rows whenever
/// that set changes, including when paging, filtering or a fetch drops rows.
#[component]
pub fn CommonTable<R: TableRow + Clone + PartialEq + 'static>(
    handle: TableHandle<R>,
    page_size_options: Vec<usize>,
    #[props(default)] empty_text: Option<String>,
    #[props(default)] selectable: bool,
    #[props(default)] on_row_select: Option<EventHandler<Vec<RowId>>>,
    children: Element,
) -> Element {
    let mut sheet_open = use_signal(|| false);

    let table = handle.table.read();
    let headers = table
        .columns()
        .iter()
        .map(|column| RenderedHeader {
            id: column.id.clone(),
            title: column.header.clone(),
            width: column.width,
            sortable: column.sortable,
            indicator: match table.sort_direction(&column.id) {
                Some(false) => " ▲",
                Some(true) => " ▼",
                None => "",
            },
        })
        .collect::<Vec<_>>();
    let rows = table
        .visible_rows()
        .iter()
        .map(|visible| RenderedRow {
            id: visible.id.clone(),
            selected: table.is_selected(&visible.id),
            cells: table
                .columns()
                .iter()
                .map(|column| column.display(&visible.row))
                .collect(),
        })
        .collect::<Vec<_>>();
    let pagination = table.pagination();
    let page_count = table.page_count();
    let total_rows = table.total_rows();
    let selected_ids = table.selected_ids();
    let selected_count = selected_ids.len();
    let all_selected = table.all_filtered_selected();
    let some_selected = table.some_filtered_selected();
    let can_previous = table.can_previous_page();
    let can_next = table.can_next_page();
    let is_loading = table.is_loading();
    let error = table.error().map(|err| err.to_string());
    let search = table.global_search().to_string();
    let filter_defs = table.filter_defs().to_vec();
    let live_filters = table.filters().to_vec();
    drop(table);

    use_effect(use_reactive!(|selected_ids| {
        if let Some(on_row_select) = on_row_select {
            on_row_select.call(selected_ids);
        }
    }));

    let selectable = selectable || on_row_select.is_some();
    let column_span = headers.len() + usize::from(selectable);
    let page_numbers = pagination_window(pagination.page_index, page_count, PAGINATION_WINDOW);
    let empty_text = empty_text.unwrap_or_else(|| "No results.".to_string());
    let active_filter_count = live_filters.len();
    let current_page = pagination.page_index + 1;

    let h_search = handle.clone();
    let h_apply = handle.clone();
    let h_clear = handle.clone();
    let h_select_all = handle.clone();
    let h_page_size = handle.clone();
    let h_first = handle.clone();
    let h_prev = handle.clone();
    let h_next = handle.clone();
    let h_last = handle.clone();
    let h_jump = handle.clone();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px;",

            div {
                style: "display: flex; justify-content: space-between; align-items: center; gap: 8px;",
                div { style: "display: flex; gap: 8px; align-items: center;",
                    input {
                        placeholder: "Search...",
                        style: "padding: 4px 8px; border: 1px solid #bbb; border-radius: 6px; min-width: 240px;",
                        value: search,
                        oninput: move |event| h_search.dispatch(TableAction::SetGlobalSearch(event.value())),
                    }
                    if !filter_defs.is_empty() {
                        button {
                            style: if active_filter_count > 0 { ACTIVE_BUTTON_STYLE } else { BUTTON_STYLE },
                            onclick: move |_| sheet_open.set(true),
                            if active_filter_count > 0 {
                                "Filters ({active_filter_count})"
                            } else {
                                "Filters"
                            }
                        }
                    }
                }
                div { style: "display: flex; gap: 8px; align-items: center;", {children} }
            }

            if sheet_open() {
                FiltersSheet {
                    defs: filter_defs.clone(),
                    live: live_filters.clone(),
                    on_apply: move |filters| {
                        h_apply.dispatch(TableAction::SetFilters(filters));
                        sheet_open.set(false);
                    },
                    on_clear: move |_| h_clear.dispatch(TableAction::ClearFilters),
                    on_close: move |_| sheet_open.set(false),
                }
            }

            if is_loading {
                div { style: "color: #4c6ef5; font-size: 13px;", "Loading..." }
            }

            div {
                style: "overflow: auto; max-height: 70vh; border: 1px solid #ddd; border-radius: 8px;",
                table {
                    style: "border-collapse: collapse; width: 100%; font-size: 14px;",
                    thead {
                        tr {
                            if selectable {
                                th { style: "{HEADER_CELL_STYLE} width: 36px;",
                                    input {
                                        r#type: "checkbox",
                                        aria_label: "Select all",
                                        checked: all_selected,
                                        "data-partial": some_selected,
                                        onclick: move |_| h_select_all.dispatch(TableAction::SelectAllVisible(!all_selected)),
                                    }
                                }
                            }
                            for header in headers {
                                {
                                    let h_sort = handle.clone();
                                    let field = header.id.clone();
                                    let width = header
                                        .width
                                        .map(|w| format!(" width: {w}px;"))
                                        .unwrap_or_default();
                                    rsx! {
                                        th { key: "{header.id}", style: "{HEADER_CELL_STYLE}{width}",
                                            if header.sortable {
                                                button {
                                                    style: "border: none; background: transparent; padding: 0; font-weight: 600; cursor: pointer;",
                                                    onclick: move |_| h_sort.dispatch(TableAction::ToggleSort(field.clone())),
                                                    "{header.title}{header.indicator}"
                                                }
                                            } else {
                                                span { style: "font-weight: 600;", "{header.title}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    tbody {
                        if rows.is_empty() && !is_loading {
                            tr {
                                td {
                                    colspan: "{column_span}",
                                    style: "padding: 24px; text-align: center; color: #666;",
                                    if let Some(error) = error.clone() {
                                        span { style: "color: #c92a2a;", "Failed to load rows: {error}" }
                                    } else {
                                        "{empty_text}"
                                    }
                                }
                            }
                        }
                        for row in rows {
                            {
                                let h_toggle = handle.clone();
                                let row_id = row.id.clone();
                                let background = if row.selected { "#eef4ff" } else { "transparent" };
                                rsx! {
                                    tr { key: "{row.id}", style: "background: {background};",
                                        if selectable {
                                            td { style: CELL_STYLE,
                                                input {
                                                    r#type: "checkbox",
                                                    checked: row.selected,
                                                    onclick: move |_| h_toggle.dispatch(TableAction::ToggleRow(row_id.clone())),
                                                }
                                            }
                                        }
                                        for cell in row.cells {
                                            td { style: CELL_STYLE, "{cell}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; justify-content: space-between; align-items: center; gap: 12px; flex-wrap: wrap;",
                div { style: "color: #666; font-size: 13px;",
                    if selectable {
                        "{selected_count} of {total_rows} row(s) selected."
                    } else {
                        "{total_rows} row(s)"
                    }
                }
                div { style: "display: flex; gap: 6px; align-items: center; flex-wrap: wrap;",
                    span { "Rows per page" }
                    select {
                        style: "padding: 4px 6px; border: 1px solid #bbb; border-radius: 6px;",
                        onchange: move |event| {
                            if let Ok(size) = event.value().parse::<usize>() {
                                h_page_size.dispatch(TableAction::SetPageSize(size));
                            }
                        },
                        for size in page_size_options {
                            option {
                                value: "{size}",
                                selected: size == pagination.page_size,
                                "{size}"
                            }
                        }
                    }
                    button {
                        style: BUTTON_STYLE,
                        disabled: !can_previous,
                        onclick: move |_| h_first.dispatch(TableAction::SetPage(0)),
                        "«"
                    }
                    button {
                        style: BUTTON_STYLE,
                        disabled: !can_previous,
                        onclick: move |_| h_prev.dispatch(TableAction::PreviousPage),
                        "‹"
                    }
                    for page in page_numbers {
                        {
                            let h_page = handle.clone();
                            let label = page + 1;
                            rsx! {
                                button {
                                    key: "{page}",
                                    style: if page == pagination.page_index { ACTIVE_BUTTON_STYLE } else { BUTTON_STYLE },
                                    onclick: move |_| h_page.dispatch(TableAction::SetPage(page)),
                                    "{label}"
                                }
                            }
                        }
                    }
                    button {
                        style: BUTTON_STYLE,
                        disabled: !can_next,
                        onclick: move |_| h_next.dispatch(TableAction::NextPage),
                        "›"
                    }
                    button {
                        style: BUTTON_STYLE,
                        disabled: !can_next,
                        onclick: move |_| h_last.dispatch(TableAction::SetPage(page_count - 1)),
                        "»"
                    }
                    span { style: "font-size: 13px; color: #666;", "Page {current_page} of {page_count}" }
                    PageJumpControl {
                        page_index: pagination.page_index,
                        page_count: page_count,
                        on_jump: move |page: usize| h_jump.dispatch(TableAction::SetPage(page)),
                    }
                }
            }
        }
    }
}
