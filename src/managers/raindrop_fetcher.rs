//! Incremental Result Fetcher.
//!
//! Owns the bookmark list of one search view. Filter changes reset the list
//! and schedule a debounced page-0 request; `load_more` appends the next page.
//!
//! Every issued request gets a fresh [`CancellationToken`] and a new
//! generation number. Issuing a request cancels the previous token, and a
//! response is only committed while its generation is still the current
//! one, so a late response from a superseded request can never overwrite
//! newer state.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::services::api_client::RaindropApi;
use crate::services::notifier::{report_failure, Notifier};
use crate::services::query_composer::RaindropQuery;
use crate::types::errors::ApiError;
use crate::types::filter::SearchFilters;
use crate::types::raindrop::{Raindrop, RaindropsResponse};
use crate::types::settings::{SearchTuning, DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    Idle,
    Debouncing,
    Fetching,
    Loaded,
    LoadingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherConfig {
    pub page_size: u32,
    /// Delay before a search-text change is sent; other filter changes apply immediately.
    pub debounce: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl From<&SearchTuning> for FetcherConfig {
    fn from(tuning: &SearchTuning) -> Self {
        Self {
            page_size: tuning.page_size.max(1),
            debounce: Duration::from_millis(tuning.debounce_ms),
        }
    }
}

/// A consistent copy of the fetcher state for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchSnapshot {
    pub raindrops: Vec<Raindrop>,
    pub page: u32,
    pub total_count: u64,
    pub has_more: bool,
    pub is_loading: bool,
    pub phase: FetchPhase,
    pub revision: u64,
}

struct FetchState {
    filters: Option<SearchFilters>,
    /// Page-0 query for `filters`.
    query: Option<RaindropQuery>,
    raindrops: Vec<Raindrop>,
    page: u32,
    total_count: u64,
    has_more: bool,
    phase: FetchPhase,
    /// A page has been committed since the last filter change.
    committed: bool,
    /// Bumped on every filter change; a debounce timer only fires for its own epoch.
    filter_epoch: u64,
    /// Bumped on every issued request and filter change.
    generation: u64,
    inflight: Option<CancellationToken>,
}

impl FetchState {
    fn new() -> Self {
        Self {
            filters: None,
            query: None,
            raindrops: Vec::new(),
            page: 0,
            total_count: 0,
            has_more: true,
            phase: FetchPhase::Idle,
            committed: false,
            filter_epoch: 0,
            generation: 0,
            inflight: None,
        }
    }

    fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Fetching | FetchPhase::LoadingMore)
    }

    fn cancel_inflight(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }

    /// Supersedes any outstanding request and registers a new one.
    fn begin(&mut self, mode: FetchMode) -> (CancellationToken, u64) {
        self.cancel_inflight();
        let token = CancellationToken::new();
        self.inflight = Some(token.clone());
        self.generation += 1;
        self.phase = match mode {
            FetchMode::Replace => FetchPhase::Fetching,
            FetchMode::Append => FetchPhase::LoadingMore,
        };
        (token, self.generation)
    }
}

/// `true` when the page was full and the total says more remain.
pub fn compute_has_more(page: u32, page_len: usize, page_size: u32, total_count: u64) -> bool {
    page_len == page_size as usize && (u64::from(page) + 1) * u64::from(page_size) < total_count
}

#[derive(Clone)]
struct FetchContext {
    api: Arc<dyn RaindropApi>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<FetchState>>,
    revision: Arc<watch::Sender<u64>>,
    page_size: u32,
}

impl FetchContext {
    fn lock(&self) -> MutexGuard<'_, FetchState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Takes the locked state so a snapshot never pairs a revision with newer state.
    fn bump_revision(&self, _held: &FetchState) {
        self.revision.send_modify(|r| *r += 1);
    }

    /// Debounce timer body: issue the page-0 request unless the filters moved on meanwhile.
    async fn fire_debounced(self, epoch: u64, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let started = {
            let mut state = self.lock();
            match state.query.clone() {
                Some(query) if state.filter_epoch == epoch => {
                    let (token, generation) = state.begin(FetchMode::Replace);
                    self.bump_revision(&state);
                    Some((query, token, generation))
                }
                _ => None,
            }
        };

        if let Some((query, token, generation)) = started {
            self.execute(query, FetchMode::Replace, token, generation).await;
        }
    }

    async fn execute(
        self,
        query: RaindropQuery,
        mode: FetchMode,
        token: CancellationToken,
        generation: u64,
    ) {
        debug!(
            collection_id = query.collection_id,
            page = query.page,
            search = %query.search,
            sort = query.sort,
            generation,
            "fetching raindrops"
        );

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(ApiError::Cancelled),
            response = self.api.get_raindrops(&query) => response,
        };

        match result {
            Ok(response) => self.commit(&query, mode, generation, response),
            Err(err) if err.is_cancelled() => {
                debug!(generation, page = query.page, "request superseded");
            }
            Err(err) => self.fail(generation, err),
        }
    }

    fn commit(&self, query: &RaindropQuery, mode: FetchMode, generation: u64, response: RaindropsResponse) {
        {
            let mut state = self.lock();
            if state.generation != generation {
                debug!(generation, current = state.generation, "discarding stale response");
                return;
            }

            let page_len = response.items.len();
            match mode {
                FetchMode::Replace => state.raindrops = response.items,
                FetchMode::Append => state.raindrops.extend(response.items),
            }
            state.total_count = response.count;
            state.has_more = compute_has_more(query.page, page_len, self.page_size, response.count);
            state.page = query.page;
            state.phase = FetchPhase::Loaded;
            state.committed = true;
            state.inflight = None;
            self.bump_revision(&state);
        }
    }

    fn fail(&self, generation: u64, err: ApiError) {
        {
            let mut state = self.lock();
            if state.generation != generation {
                debug!(generation, error = %err, "ignoring failure of superseded request");
                return;
            }
            state.inflight = None;
            state.phase = if state.committed {
                FetchPhase::Loaded
            } else {
                FetchPhase::Idle
            };
            self.bump_revision(&state);
        }

        warn!(error = %err, "raindrop fetch failed");
        report_failure(self.notifier.as_ref(), &err);
    }
}

/// Debounced, cancellable, page-accumulating bookmark list.
pub struct RaindropFetcher {
    ctx: FetchContext,
    debounce_delay: Duration,
    debounce: Option<JoinHandle<()>>,
}

impl RaindropFetcher {
    /// Must be created inside a tokio runtime; requests run on spawned tasks.
    pub fn new(api: Arc<dyn RaindropApi>, notifier: Arc<dyn Notifier>, config: FetcherConfig) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            ctx: FetchContext {
                api,
                notifier,
                state: Arc::new(Mutex::new(FetchState::new())),
                revision: Arc::new(revision),
                page_size: config.page_size,
            },
            debounce_delay: config.debounce,
            debounce: None,
        }
    }

    /// Applies a filter combination. Returns `false` (and does nothing) if it is unchanged.
    pub fn set_filters(&mut self, filters: SearchFilters) -> bool {
        if self.ctx.lock().filters.as_ref() == Some(&filters) {
            return false;
        }
        self.restart(filters);
        true
    }

    /// Reloads from page 0 with the current filters.
    pub fn refresh(&mut self) {
        let current = self.ctx.lock().filters.clone();
        if let Some(filters) = current {
            self.restart(filters);
        }
    }

    fn restart(&mut self, filters: SearchFilters) {
        if let Some(timer) = self.debounce.take() {
            timer.abort();
        }

        let delay = if filters.search_text.is_empty() {
            Duration::ZERO
        } else {
            self.debounce_delay
        };

        let epoch = {
            let mut state = self.ctx.lock();
            state.cancel_inflight();
            state.generation += 1;
            state.filter_epoch += 1;
            state.query = Some(RaindropQuery::compose(&filters, 0, self.ctx.page_size));
            state.filters = Some(filters);
            state.raindrops.clear();
            state.page = 0;
            state.total_count = 0;
            state.has_more = true;
            state.committed = false;
            state.phase = FetchPhase::Debouncing;
            self.ctx.bump_revision(&state);
            state.filter_epoch
        };

        let ctx = self.ctx.clone();
        self.debounce = Some(tokio::spawn(ctx.fire_debounced(epoch, delay)));
    }

    /// Requests the next page. Returns `false` when loading, exhausted, or nothing is loaded yet.
    pub fn load_more(&self) -> bool {
        let started = {
            let mut state = self.ctx.lock();
            if state.phase != FetchPhase::Loaded || !state.has_more {
                return false;
            }
            let Some(base) = state.query.clone() else {
                return false;
            };
            let query = base.with_page(state.page + 1);
            let (token, generation) = state.begin(FetchMode::Append);
            self.ctx.bump_revision(&state);
            (query, token, generation)
        };

        let (query, token, generation) = started;
        let ctx = self.ctx.clone();
        tokio::spawn(ctx.execute(query, FetchMode::Append, token, generation));
        true
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        let state = self.ctx.lock();
        let revision = *self.ctx.revision.borrow();
        FetchSnapshot {
            raindrops: state.raindrops.clone(),
            page: state.page,
            total_count: state.total_count,
            has_more: state.has_more,
            is_loading: state.is_loading(),
            phase: state.phase,
            revision,
        }
    }

    pub fn filters(&self) -> Option<SearchFilters> {
        self.ctx.lock().filters.clone()
    }

    pub fn phase(&self) -> FetchPhase {
        self.ctx.lock().phase
    }

    pub fn is_loading(&self) -> bool {
        self.ctx.lock().is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.ctx.lock().has_more
    }

    pub fn page_size(&self) -> u32 {
        self.ctx.page_size
    }

    /// Receiver whose value increments on every observable state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ctx.revision.subscribe()
    }

    /// Waits until no debounce or request is pending and returns the state at that point.
    pub async fn settled(&self) -> FetchSnapshot {
        let mut revisions = self.subscribe();
        loop {
            let snapshot = self.snapshot();
            if !snapshot.is_loading && snapshot.phase != FetchPhase::Debouncing {
                return snapshot;
            }
            if revisions.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }

    /// Follows pages until the list is exhausted or a page fails to load.
    ///
    /// A failed page is not requested again; the returned snapshot then still
    /// has `has_more` set.
    pub async fn load_remaining(&self) -> FetchSnapshot {
        let mut snapshot = self.settled().await;
        while snapshot.has_more {
            let page = snapshot.page;
            if !self.load_more() {
                break;
            }
            snapshot = self.settled().await;
            if snapshot.page == page {
                debug!(page = page + 1, "stopping after failed page");
                break;
            }
        }
        snapshot
    }
}

impl Drop for RaindropFetcher {
    fn drop(&mut self) {
        if let Some(timer) = self.debounce.take() {
            timer.abort();
        }
        self.ctx.lock().cancel_inflight();
    }
}
