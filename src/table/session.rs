use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info, warn};

use crate::conf::{Config, GeocodingConfig};
use crate::core::LoadboardError;
use crate::location::{Geocoder, LocationResolver};
use crate::model::{Load, LoadId, Stop};
use crate::source::{LoadPage, LoadSource};

use super::controller::QueryController;
use super::query::TableQuery;
use super::selection::Selection;

/// A materialized table row. Owns one resolver per displayed stop; they live
/// exactly as long as the row stays on screen.
pub struct LoadRow {
    pub load: Load,
    pub pickup: LocationResolver,
    pub delivery: LocationResolver,
}

impl LoadRow {
    fn new(load: Load, geocoder: &Arc<dyn Geocoder>, config: &GeocodingConfig) -> Self {
        let mut row = Self {
            load,
            pickup: LocationResolver::new(geocoder.clone(), config),
            delivery: LocationResolver::new(geocoder.clone(), config),
        };
        row.retarget();
        row
    }

    pub fn id(&self) -> &LoadId {
        &self.load.id
    }

    fn update(&mut self, load: Load) {
        self.load = load;
        self.retarget();
    }

    fn retarget(&mut self) {
        self.pickup.set_target(self.load.pickup().map(Stop::coordinate));
        self.delivery.set_target(self.load.delivery().map(Stop::coordinate));
    }
}

/// User-visible message raised by a failed data request.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
}

/// Handle for one issued listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    seq: u64,
    query: TableQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }
}

/// One load table view: query state, the rows last received, row selection,
/// scroll position and pending notifications.
///
/// Only the most recently issued fetch may replace the rows. Failed requests
/// leave the previous rows in place and queue a notification.
pub struct LoadTable {
    controller: QueryController,
    source: Arc<dyn LoadSource>,
    geocoder: Arc<dyn Geocoder>,
    geocoding: GeocodingConfig,
    rows: Vec<LoadRow>,
    total: u64,
    selection: Selection,
    scroll_top: usize,
    latest_fetch: u64,
    issued_query: Option<TableQuery>,
    notifications: VecDeque<Notification>,
}

impl LoadTable {
    pub fn new(config: &Config, source: Arc<dyn LoadSource>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            controller: QueryController::new(
                Arc::new(config.statuses.clone()),
                config.table.clone(),
            ),
            source,
            geocoder,
            geocoding: config.geocoding.clone(),
            rows: Vec::new(),
            total: 0,
            selection: Selection::new(),
            scroll_top: 0,
            latest_fetch: 0,
            issued_query: None,
            notifications: VecDeque::new(),
        }
    }

    pub fn controller(&self) -> &QueryController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut QueryController {
        &mut self.controller
    }

    pub fn rows(&self) -> &[LoadRow] {
        &self.rows
    }

    pub fn row(&self, id: &LoadId) -> Option<&LoadRow> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn visible_ids(&self) -> Vec<LoadId> {
        self.rows.iter().map(|row| row.id().clone()).collect()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selected(&mut self, id: LoadId) {
        self.selection.toggle(id);
    }

    pub fn select_all(&mut self, checked: bool) {
        let visible = self.visible_ids();
        self.selection.set_all(checked, &visible);
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, offset: usize) {
        self.scroll_top = offset;
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Issue a listing request for the current query. Any earlier ticket
    /// becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        let query = self.controller.query();
        self.issued_query = Some(query.clone());
        FetchTicket {
            seq: self.latest_fetch,
            query,
        }
    }

    /// Apply the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the outcome discarded.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<LoadPage, LoadboardError>,
    ) -> bool {
        if ticket.seq != self.latest_fetch {
            debug!(
                "discarding stale fetch #{} (latest #{})",
                ticket.seq, self.latest_fetch
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.replace_rows(page);
                true
            }
            Err(err) => {
                self.notify(format!("Failed to load loads: {err}"));
                true
            }
        }
    }

    fn replace_rows(&mut self, page: LoadPage) {
        let mut previous: AHashMap<LoadId, LoadRow> = self
            .rows
            .drain(..)
            .map(|row| (row.id().clone(), row))
            .collect();

        self.rows = page
            .items
            .into_iter()
            .map(|load| match previous.remove(&load.id) {
                Some(mut row) => {
                    row.update(load);
                    row
                }
                None => LoadRow::new(load, &self.geocoder, &self.geocoding),
            })
            .collect();
        self.total = page.total;

        debug!("dropping {} rows that left the page", previous.len());
        drop(previous);

        let visible = self.visible_ids();
        self.selection.reconcile(&visible);
        self.scroll_top = 0;
    }

    /// Fetch and apply the current query.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_fetch();
        let result = self.source.list(ticket.query()).await;
        self.apply_fetch(ticket, result)
    }

    /// Refresh only if the query changed since the last issued fetch.
    pub async fn sync(&mut self) -> bool {
        if self.issued_query.as_ref() == Some(&self.controller.query()) {
            return false;
        }
        self.refresh().await
    }

    /// Delete one load and refetch the current page. A failed delete only
    /// queues a notification.
    pub async fn delete(&mut self, id: &LoadId) -> bool {
        match self.source.delete(id).await {
            Ok(()) => {
                info!("load {id} deleted, refreshing");
                self.refresh().await;
                true
            }
            Err(err) => {
                self.notify(format!("Failed to delete load {id}: {err}"));
                false
            }
        }
    }

    fn notify(&mut self, message: String) {
        warn!("{message}");
        self.notifications.push_back(Notification { message });
    }
}
