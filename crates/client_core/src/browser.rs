//! View-controller for the paginated catalog table.
//!
//! [`CatalogBrowser`] owns the current page, the cross-page selection and the
//! page index. Page loads are split into a ticket-issuing half and an
//! applying half so that a caller may run the fetch elsewhere; responses for
//! a ticket that is no longer the latest are dropped.

use shared::{
    domain::{Artwork, ArtworkId, PAGE_SIZE},
    error::ApiError,
    protocol::ArtworkPageResponse,
};
use tracing::{debug, info, warn};

use crate::{
    error::BrowseError,
    paginator::Paginator,
    selection::{is_page_fully_selected, SelectionSet},
    source::ArtworkSource,
};

/// Counts below this are served from the loaded page without fetching.
pub const LOCAL_SELECT_LIMIT: usize = PAGE_SIZE + 1;

/// Ticket for one in-flight page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    index: usize,
}

impl PageRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page_number(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadOutcome {
    Applied { rows: usize },
    Discarded,
}

/// State of the "select rows" overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSelectForm {
    open: bool,
    value: String,
}

impl BulkSelectForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    fn clear_and_close(&mut self) {
        self.value.clear();
        self.open = false;
    }
}

/// A row count typed into the overlay, after numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowCount(f64);

impl RowCount {
    /// Blank input is zero; anything else must be a finite decimal number.
    pub fn parse(raw: &str) -> Result<Self, BrowseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self(0.0));
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Self(value)),
            _ => Err(BrowseError::InvalidCount(raw.to_string())),
        }
    }

    pub fn new(count: usize) -> Self {
        Self(count as f64)
    }

    /// Rows to take from the head of the candidate list.
    pub fn rows(&self) -> usize {
        if self.0 <= 0.0 {
            0
        } else {
            self.0.trunc() as usize
        }
    }

    pub fn is_local(&self) -> bool {
        self.0 < LOCAL_SELECT_LIMIT as f64
    }

    /// Pages fetched when the count cannot be served locally.
    pub fn pages_to_fetch(&self) -> usize {
        if self.is_local() {
            0
        } else {
            (self.0 / PAGE_SIZE as f64).ceil() as usize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSelectOutcome {
    pub requested: usize,
    pub fetched_pages: Vec<usize>,
    pub added: usize,
}

#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    paginator: Paginator,
    items: Vec<Artwork>,
    selection: SelectionSet,
    select_all: bool,
    loading: bool,
    generation: u64,
    last_error: Option<ApiError>,
    form: BulkSelectForm,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(Paginator::default())
    }
}

impl CatalogBrowser {
    pub fn new(paginator: Paginator) -> Self {
        let mut browser = Self {
            paginator,
            items: Vec::new(),
            selection: SelectionSet::new(),
            select_all: false,
            loading: false,
            generation: 0,
            last_error: None,
            form: BulkSelectForm::default(),
        };
        browser.refresh_select_all();
        browser
    }

    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn page_index(&self) -> usize {
        self.paginator.index()
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn form(&self) -> &BulkSelectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BulkSelectForm {
        &mut self.form
    }

    /// Moves to `index` and issues a ticket for its page. The selection is
    /// left alone.
    pub fn begin_page_load(&mut self, index: usize) -> Result<PageRequest, BrowseError> {
        self.paginator.set_index(index)?;
        self.generation += 1;
        self.loading = true;
        self.refresh_select_all();
        let request = PageRequest {
            generation: self.generation,
            index,
        };
        debug!(
            page_number = request.page_number(),
            generation = request.generation,
            "page load started"
        );
        Ok(request)
    }

    /// Re-requests the current page, e.g. after a failed load.
    pub fn begin_reload(&mut self) -> Result<PageRequest, BrowseError> {
        self.begin_page_load(self.paginator.index())
    }

    /// Applies the response for `request` unless a newer request was issued.
    /// A failed load keeps the previous rows and records the error.
    pub fn finish_page_load(
        &mut self,
        request: PageRequest,
        result: Result<ArtworkPageResponse, BrowseError>,
    ) -> Result<PageLoadOutcome, BrowseError> {
        if request.generation != self.generation {
            debug!(
                page_number = request.page_number(),
                generation = request.generation,
                latest = self.generation,
                "discarding stale page response"
            );
            return Ok(PageLoadOutcome::Discarded);
        }

        self.loading = false;
        match result {
            Ok(page) => {
                if let Some(total) = page.pagination.as_ref().and_then(|p| p.total) {
                    if total != self.paginator.total_records() as u64 {
                        warn!(
                            reported = total,
                            assumed = self.paginator.total_records(),
                            "catalog reports a different record count; paginator keeps the assumed total"
                        );
                    }
                }
                let rows = page.data.len();
                self.items = page.data;
                self.last_error = None;
                self.refresh_select_all();
                info!(page_number = request.page_number(), rows, "page loaded");
                Ok(PageLoadOutcome::Applied { rows })
            }
            Err(err) => {
                warn!(page_number = request.page_number(), error = %err, "page load failed");
                self.last_error = Some(err.to_api_error());
                Err(err)
            }
        }
    }

    /// Fetches and applies page `index` in one step.
    pub async fn load_page(
        &mut self,
        source: &dyn ArtworkSource,
        index: usize,
    ) -> Result<PageLoadOutcome, BrowseError> {
        let request = self.begin_page_load(index)?;
        let result = source.fetch_page(request.page_number()).await;
        self.finish_page_load(request, result)
    }

    /// Replaces the whole selection, as a table widget reports it.
    pub fn replace_selection<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Artwork>,
    {
        self.selection = items.into_iter().collect();
        self.refresh_select_all();
    }

    /// Flips one row of the current page. Returns the new checked state, or
    /// `None` when no row with that id is shown.
    pub fn toggle_item(&mut self, id: ArtworkId) -> Option<bool> {
        let item = self.items.iter().find(|item| item.id == id)?.clone();
        let checked = if self.selection.remove(id).is_some() {
            false
        } else {
            self.selection.insert(item);
            true
        };
        self.refresh_select_all();
        Some(checked)
    }

    /// Header checkbox: add the whole page, or remove every row of it.
    /// Returns how many selection entries changed.
    pub fn set_page_selected(&mut self, checked: bool) -> usize {
        let changed = if checked {
            self.selection.union(&self.items)
        } else {
            self.selection.subtract(&self.items)
        };
        self.refresh_select_all();
        changed
    }

    /// Runs the overlay's pending count. The input is cleared and the overlay
    /// closed whatever the outcome.
    pub async fn submit_bulk_select(
        &mut self,
        source: &dyn ArtworkSource,
    ) -> Result<BulkSelectOutcome, BrowseError> {
        let result = match RowCount::parse(self.form.value()) {
            Ok(count) => self.bulk_select(source, count).await,
            Err(err) => Err(err),
        };
        self.form.clear_and_close();
        result
    }

    /// Selects the first `count` rows. Small counts come from the loaded
    /// page; larger ones fetch pages `index + 1 ..= index + ceil(count / 12)`
    /// one after another. Any fetch failure aborts without touching the
    /// selection.
    pub async fn bulk_select(
        &mut self,
        source: &dyn ArtworkSource,
        count: RowCount,
    ) -> Result<BulkSelectOutcome, BrowseError> {
        let requested = count.rows();

        if count.is_local() {
            let added = self.selection.union(self.items.iter().take(requested));
            self.refresh_select_all();
            info!(requested, added, "selected leading rows of the loaded page");
            return Ok(BulkSelectOutcome {
                requested,
                fetched_pages: Vec::new(),
                added,
            });
        }

        let base = self.paginator.index();
        let mut fetched_pages = Vec::new();
        let mut candidates = Vec::new();
        for offset in 1..=count.pages_to_fetch() {
            let page_number = base.saturating_add(offset);
            match source.fetch_page(page_number).await {
                Ok(page) => {
                    fetched_pages.push(page_number);
                    candidates.extend(page.data);
                }
                Err(err) => {
                    warn!(page_number, error = %err, "bulk select fetch failed");
                    return Err(BrowseError::BulkFetch {
                        page: page_number,
                        source: Box::new(err),
                    });
                }
            }
        }

        let added = self.selection.union(candidates.iter().take(requested));
        self.refresh_select_all();
        info!(
            requested,
            added,
            pages = fetched_pages.len(),
            "selected leading rows across pages"
        );
        Ok(BulkSelectOutcome {
            requested,
            fetched_pages,
            added,
        })
    }

    fn refresh_select_all(&mut self) {
        self.select_all = is_page_fully_selected(&self.items, &self.selection);
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
