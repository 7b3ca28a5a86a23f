use std::path::PathBuf;
use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::config::AppConfig;
use crate::domain::entities::filter::{FilterDef, FilterKind, FilterOption};
use crate::domain::entities::query::RowId;
use crate::domain::entities::row::{CellValue, ColumnDef};
use crate::domain::entities::word::{demo_words, WordEntry};
use crate::infra::mock::fetcher::MockFetcher;
use crate::infra::sqlite::repo::SqliteWordRepo;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::table::CommonTable;
use crate::ui::state::table_state::use_table;
use crate::usecase::ports::fetcher::RowFetcher;
use crate::usecase::ports::repo::WordRepository;
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::table::{without_rows, TableAction, TableOrchestrator};

const TOOLBAR_BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const DEMO_SEED_SIZE: usize = 120;

fn capitalized(value: &CellValue) -> String {
    let text = value.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn star(value: &CellValue) -> String {
    let starred = matches!(value, CellValue::Bool(true));
    if starred { "★" } else { "☆" }.to_string()
}

fn percent(value: &CellValue) -> String {
    value
        .as_number()
        .map(|progress| format!("{progress:.0}%"))
        .unwrap_or_default()
}

pub fn word_columns() -> Vec<ColumnDef<WordEntry>> {
    vec![
        ColumnDef::key("word", "Word").with_width(160),
        ColumnDef::key("meaning", "Meaning").unsortable(),
        ColumnDef::key("difficulty", "Difficulty").with_render(capitalized),
        ColumnDef::key("tags", "Tags").unsortable(),
        ColumnDef::key("createdAt", "Added"),
        ColumnDef::key("favorite", "Fav").with_render(star).with_width(60),
        ColumnDef::key("progress", "Progress").with_render(percent),
    ]
}

pub fn word_filters() -> Vec<FilterDef> {
    vec![
        FilterDef::new("difficulty", "Difficulty", FilterKind::Select).with_options(vec![
            FilterOption::labeled("", "All"),
            FilterOption::labeled("easy", "Easy"),
            FilterOption::labeled("medium", "Medium"),
            FilterOption::labeled("hard", "Hard"),
        ]),
        FilterDef::new("tags", "Tags", FilterKind::MultiSelect).with_options(
            ["vocab", "verb", "adjective", "noun", "phrasal"]
                .into_iter()
                .map(FilterOption::new)
                .collect(),
        ),
        FilterDef::new("createdAt", "Added On", FilterKind::Date),
        FilterDef::new("word", "Word", FilterKind::Text),
        FilterDef::new("progress", "Progress", FilterKind::NumberRange),
    ]
}

fn demo_entries(count: usize) -> Vec<WordEntry> {
    demo_words(count, chrono::Utc::now().date_naive())
        .into_iter()
        .zip(1..)
        .map(|(word, id)| word.into_entry(id))
        .collect()
}

/// Client-side table over a fixed demo vocabulary.
#[component]
pub fn LocalWordsPage() -> Element {
    let config = use_context::<AppConfig>();
    let options = config.table_options();
    let handle = use_table(
        move || TableOrchestrator::local(word_columns(), word_filters(), demo_entries(73), options),
        None,
    );
    let h_remove = handle.clone();
    let nothing_selected = handle.table.read().selected_count() == 0;

    rsx! {
        CommonTable {
            handle: handle.clone(),
            page_size_options: config.page_size_options.clone(),
            empty_text: "No demo rows".to_string(),
            selectable: true,
            button {
                style: TOOLBAR_BUTTON_STYLE,
                disabled: nothing_selected,
                onclick: move |_| {
                    let remaining = {
                        let table = h_remove.table.peek();
                        let remove = table.selected_ids();
                        log::info!("removing {} demo rows", remove.len());
                        without_rows(table.rows(), &remove)
                    };
                    h_remove.dispatch(TableAction::ReplaceData(remaining));
                },
                "Remove selected"
            }
        }
    }
}

/// Server-style table over the in-memory mock source.
#[component]
pub fn MockWordsPage(failing: bool) -> Element {
    let config = use_context::<AppConfig>();
    let options = config.table_options();
    let latency = config.mock_latency();
    let fetcher = use_hook(move || {
        let source = if failing {
            MockFetcher::failing()
        } else {
            MockFetcher::new(demo_entries(250))
        };
        Arc::new(source.with_latency(latency)) as Arc<dyn RowFetcher<WordEntry>>
    });
    let handle = use_table(
        move || TableOrchestrator::remote(word_columns(), word_filters(), options),
        Some(fetcher),
    );

    let h_reload = handle.clone();

    rsx! {
        CommonTable {
            handle: handle.clone(),
            page_size_options: config.page_size_options.clone(),
            on_row_select: move |ids: Vec<RowId>| log::debug!("{} mock rows selected", ids.len()),
            button {
                style: TOOLBAR_BUTTON_STYLE,
                onclick: move |_| h_reload.reload(),
                "Reload"
            }
        }
    }
}

/// Opens the word store (creating and seeding it if needed) before mounting
/// its table.
#[component]
pub fn StoreWordsPage() -> Element {
    let config = use_context::<AppConfig>();
    let db_path = config.database_path();
    let seed = config.seed_demo_data;

    let db_path_for_init = db_path.clone();
    let ready = use_resource(move || {
        let repo = SqliteWordRepo::new(db_path_for_init.clone());
        async move {
            let opened = run_blocking(move || {
                repo.init()?;
                if seed {
                    repo.seed_demo_words(&demo_words(
                        DEMO_SEED_SIZE,
                        chrono::Utc::now().date_naive(),
                    ))
                } else {
                    Ok(0)
                }
            })
            .await;
            match opened {
                Ok(Ok(seeded)) => Ok(seeded),
                Ok(Err(err)) => Err(err.to_string()),
                Err(err) => Err(err.to_string()),
            }
        }
    });

    let state = ready.read().clone();
    match state {
        None => rsx! {
            p { "Opening word store..." }
        },
        Some(Err(err)) => rsx! {
            p { style: "color: #c92a2a;", "Failed to open word store: {err}" }
        },
        Some(Ok(seeded)) => {
            if seeded > 0 {
                log::info!("seeded word store with {seeded} demo words");
            }
            rsx! {
                WordStoreTable { db_path: db_path }
            }
        }
    }
}

#[component]
fn WordStoreTable(db_path: PathBuf) -> Element {
    let config = use_context::<AppConfig>();
    let options = config.table_options();
    let repo = use_hook(|| Arc::new(SqliteWordRepo::new(db_path.clone())) as Arc<dyn WordRepository>);
    let fetcher = use_hook(|| Arc::new(QueryService::new(repo.clone())) as Arc<dyn RowFetcher<WordEntry>>);
    let handle = use_table(
        move || TableOrchestrator::remote(word_columns(), word_filters(), options),
        Some(fetcher),
    );

    let mut status = use_signal(|| "Ready".to_string());
    let mut busy = use_signal(|| false);

    let h_import = handle.clone();
    let h_delete = handle.clone();
    let repo_for_delete = repo.clone();
    let nothing_selected = handle.table.read().selected_count() == 0;

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 8px;",
            div { style: "color: #666; font-size: 13px;", "{status}" }
            CommonTable {
                handle: handle.clone(),
                page_size_options: config.page_size_options.clone(),
                empty_text: "No words stored yet".to_string(),
                selectable: true,
                button {
                    style: TOOLBAR_BUTTON_STYLE,
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(file_path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .add_filter("All files", &["*"])
                            .pick_file()
                        else {
                            return;
                        };
                        let service = ImportService::new(db_path.clone());
                        let handle = h_import.clone();
                        busy.set(true);
                        status.set(format!("Importing {}", file_path.display()));
                        spawn(async move {
                            match run_blocking(move || service.import_csv(&file_path)).await {
                                Ok(Ok(summary)) => {
                                    status.set(format!(
                                        "Imported {} words ({} skipped)",
                                        summary.inserted, summary.skipped
                                    ));
                                    handle.reload();
                                }
                                Ok(Err(err)) => status.set(format!("Import failed: {err:#}")),
                                Err(err) => status.set(format!("Import failed: {err}")),
                            }
                            busy.set(false);
                        });
                    },
                    "Import CSV"
                }
                button {
                    style: TOOLBAR_BUTTON_STYLE,
                    disabled: busy() || nothing_selected,
                    onclick: move |_| {
                        let ids = h_delete.table.peek().selected_ids();
                        if ids.is_empty() {
                            return;
                        }
                        let confirmed = MessageDialog::new()
                            .set_level(MessageLevel::Warning)
                            .set_title("Delete words")
                            .set_description(format!("Delete {} selected words?", ids.len()))
                            .set_buttons(MessageButtons::YesNo)
                            .show();
                        if confirmed != MessageDialogResult::Yes {
                            return;
                        }
                        let service = EditService::new(repo_for_delete.clone());
                        let handle = h_delete.clone();
                        busy.set(true);
                        spawn(async move {
                            match run_blocking(move || service.delete_words(&ids)).await {
                                Ok(Ok(deleted)) => {
                                    status.set(format!("Deleted {deleted} words"));
                                    handle.reload();
                                }
                                Ok(Err(err)) => status.set(format!("Delete failed: {err}")),
                                Err(err) => status.set(format!("Delete failed: {err}")),
                            }
                            busy.set(false);
                        });
                    },
                    "Delete selected"
                }
            }
        }
    }
}
