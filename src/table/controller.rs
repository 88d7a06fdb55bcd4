use std::sync::Arc;

use log::{debug, warn};

use crate::conf::{StatusCatalog, TableConfig};
use crate::core::LoadboardError;

use super::query::{
    FilterField, FilterInput, Filters, Sort, SortDirection, SortField, TableQuery,
};

/// Where the filter inputs stand relative to the query being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPhase {
    /// No filters committed and no draft edits.
    Clean,
    /// Draft differs from what is committed, or was edited since.
    Dirty,
    /// A non-empty filter set is applied.
    Committed,
}

/// Owns page, sort and filter state for one load table and derives the
/// [`TableQuery`] sent to the data source.
///
/// Filter edits are drafted first and only reach the query on
/// [`QueryController::commit`]. Sorting is single-column.
#[derive(Debug, Clone)]
pub struct QueryController {
    catalog: Arc<StatusCatalog>,
    table: TableConfig,
    draft: Filters,
    committed: Filters,
    sort: Option<Sort>,
    page: usize,
    page_size: usize,
    phase: FilterPhase,
}

impl QueryController {
    pub fn new(catalog: Arc<StatusCatalog>, table: TableConfig) -> Self {
        let page_size = table.default_page_size;
        Self {
            catalog,
            table,
            draft: Filters::default(),
            committed: Filters::default(),
            sort: None,
            page: 0,
            page_size,
            phase: FilterPhase::Clean,
        }
    }

    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    pub fn draft(&self) -> &Filters {
        &self.draft
    }

    pub fn committed(&self) -> &Filters {
        &self.committed
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn catalog(&self) -> &Arc<StatusCatalog> {
        &self.catalog
    }

    pub fn update_pending_filter(&mut self, input: FilterInput) {
        self.draft.apply(input);
        self.phase = FilterPhase::Dirty;
    }

    /// Parse raw text for `field` and draft it. Text that does not parse is
    /// dropped; returns whether the draft was updated.
    pub fn apply_text_input(&mut self, field: FilterField, raw: &str) -> bool {
        match FilterInput::parse(field, raw).and_then(|input| self.offered(input)) {
            Ok(input) => {
                self.update_pending_filter(input);
                true
            }
            Err(err) => {
                warn!("ignoring filter input: {err}");
                false
            }
        }
    }

    /// Reject statuses the injected catalog does not offer.
    fn offered(&self, input: FilterInput) -> Result<FilterInput, LoadboardError> {
        if let FilterInput::Status(selected) = &input {
            if let Some(status) = selected
                .iter()
                .find(|s| self.catalog.load_stage(**s).is_none())
            {
                return Err(LoadboardError::InvalidInput(format!(
                    "status '{}' is not offered",
                    status.as_str()
                )));
            }
        }
        Ok(input)
    }

    /// Freeze the draft into the committed filters and go back to the first
    /// page. An empty draft resets everything instead.
    pub fn commit(&mut self) {
        if self.draft.is_empty(&self.catalog) {
            debug!("empty filter draft committed, resetting");
            self.reset_all();
            return;
        }
        self.committed = self.draft.clone();
        self.page = 0;
        self.phase = FilterPhase::Committed;
    }

    pub fn reset_all(&mut self) {
        self.draft = Filters::default();
        self.committed = Filters::default();
        self.page = 0;
        self.phase = FilterPhase::Clean;
    }

    /// Apply an explicit sort request. `None` clears sorting. Leaves the page
    /// unchanged.
    pub fn request_sort(&mut self, field: SortField, direction: Option<SortDirection>) {
        self.sort = direction.map(|direction| Sort { field, direction });
    }

    /// Header click: unsorted -> ascending -> descending -> unsorted for the
    /// same column; a different column always starts ascending.
    pub fn cycle_sort(&mut self, field: SortField) {
        let next = match self.sort {
            Some(Sort {
                field: current,
                direction,
            }) if current == field => match direction {
                SortDirection::Asc => Some(SortDirection::Desc),
                SortDirection::Desc => None,
            },
            _ => Some(SortDirection::Asc),
        };
        self.request_sort(field, next);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size and return to the first page. Sizes outside the
    /// configured options are ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.table.allows_page_size(page_size) {
            warn!("ignoring unsupported page size {page_size}");
            return false;
        }
        self.page_size = page_size;
        self.page = 0;
        true
    }

    pub fn query(&self) -> TableQuery {
        TableQuery {
            page: self.page,
            page_size: self.page_size,
            sort_field: self.sort.map(|s| s.field),
            sort_direction: self.sort.map(|s| s.direction),
            ref_number: self.committed.ref_number.clone(),
            status: self.committed.status_filter(&self.catalog),
            load_number: self.committed.load_number.map(|n| n.get()),
            truck_number: self.committed.truck_number.map(|n| n.get()),
        }
    }
}
