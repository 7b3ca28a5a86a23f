use std::sync::Arc;
use std::time::Instant;

use dioxus::prelude::*;

use crate::domain::entities::row::TableRow;
use crate::usecase::ports::fetcher::RowFetcher;
use crate::usecase::services::table::{TableAction, TableEffect, TableOrchestrator};

/// A table orchestrator living in a signal, plus the source its fetch
/// effects are sent to. Local tables have no fetcher.
pub struct TableHandle<R: 'static> {
    pub table: Signal<TableOrchestrator<R>>,
    fetcher: Option<Arc<dyn RowFetcher<R>>>,
}

impl<R: 'static> Clone for TableHandle<R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<R: 'static> PartialEq for TableHandle<R> {
    fn eq(&self, other: &Self) -> bool {
        let same_fetcher = match (&self.fetcher, &other.fetcher) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.table == other.table && same_fetcher
    }
}

impl<R> TableHandle<R>
where
    R: TableRow + Clone + 'static,
{
    pub fn dispatch(&self, action: TableAction<R>) {
        let schedules_search = matches!(action, TableAction::SetGlobalSearch(_));
        let mut table = self.table;
        let effect = table.write().dispatch(action);
        self.run(effect);
        if schedules_search {
            self.schedule_search_poll();
        }
    }

    /// Re-runs the current query, e.g. after the store changed underneath it.
    pub fn reload(&self) {
        let mut table = self.table;
        let effect = table.write().reload();
        self.run(effect);
    }

    fn refresh(&self) {
        let mut table = self.table;
        let effect = table.write().refresh();
        self.run(effect);
    }

    // Each keystroke schedules a poll at the end of its own window; only the
    // poll after the last keystroke finds the value settled.
    fn schedule_search_poll(&self) {
        let mut table = self.table;
        let delay = table.peek().search_delay();
        let handle = self.clone();
        spawn(async move {
            tokio::time::sleep(delay).await;
            let effect = table.write().poll_search(Instant::now());
            handle.run(effect);
        });
    }

    fn run(&self, effect: TableEffect) {
        let TableEffect::Fetch(ticket) = effect else {
            return;
        };
        let Some(fetcher) = self.fetcher.clone() else {
            log::warn!("fetch #{} requested by a table without a data source", ticket.seq);
            return;
        };
        let mut table = self.table;
        spawn(async move {
            let result = fetcher.fetch(ticket.params).await;
            table.write().complete_fetch(ticket.seq, result);
        });
    }
}

/// Mounts a table orchestrator for the calling component. Remote tables
/// issue their first fetch after mount; results arriving after unmount are
/// dropped.
pub fn use_table<R>(
    init: impl FnOnce() -> TableOrchestrator<R>,
    fetcher: Option<Arc<dyn RowFetcher<R>>>,
) -> TableHandle<R>
where
    R: TableRow + Clone + 'static,
{
    let table = use_signal(init);
    let handle = use_hook(move || TableHandle { table, fetcher });

    let handle_for_mount = handle.clone();
    use_effect(move || handle_for_mount.refresh());

    use_drop(move || {
        let mut table = table;
        if let Ok(mut table) = table.try_write() {
            table.shutdown();
        };
    });

    handle
}
