//! List Sync Engine
//!
//! Owns one panel's cached collection and keeps it in step with the
//! server. The cache is the only thing the list view renders, so every
//! mutation here is immediately what the user sees.
//!
//! Requests are stamped with the collection generation they were issued
//! under. `reload` and `load_page` start a new generation; a response for
//! an older one is discarded on arrival and never touches the cache or the
//! `loading_more` flag.

use leptos::prelude::*;
use percent_encoding::utf8_percent_encode;
use thiserror::Error;

use crate::config::{Pagination, PanelSpec, URL_COMPONENT};
use crate::gateway::{parse_page, HttpGateway, Page, RequestError};
use crate::models::{ItemId, ResourceItem, ResourceKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("item {0} is not in the cached collection")]
    NotFoundLocally(ItemId),
}

// ========================
// Cursor
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Offset { offset: u32, limit: u32 },
    Page { page: u32, per_page: u32 },
    Whole,
}

impl Cursor {
    pub fn start(pagination: Pagination) -> Self {
        match pagination {
            Pagination::Offset { limit } => Cursor::Offset { offset: 0, limit },
            Pagination::Pages { per_page } => Cursor::Page { page: 1, per_page },
            Pagination::None => Cursor::Whole,
        }
    }

    fn rewind(self) -> Self {
        match self {
            Cursor::Offset { limit, .. } => Cursor::Offset { offset: 0, limit },
            Cursor::Page { per_page, .. } => Cursor::Page { page: 1, per_page },
            Cursor::Whole => Cursor::Whole,
        }
    }

    fn shift(&mut self, delta: i64) {
        if let Cursor::Offset { offset, .. } = self {
            *offset = (i64::from(*offset) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match *self {
            Cursor::Offset { offset, limit } => vec![("offset", offset.to_string()), ("limit", limit.to_string())],
            Cursor::Page { page, per_page } => vec![("page", page.to_string()), ("per_page", per_page.to_string())],
            Cursor::Whole => Vec::new(),
        }
    }
}

/// Build the list URL for a filter and cursor
pub fn list_url(spec: &PanelSpec, filter: &str, cursor: &Cursor) -> String {
    let mut params = Vec::new();
    if !filter.is_empty() {
        params.push((spec.filter_param.as_str(), filter.to_string()));
    }
    params.extend(cursor.query());

    if params.is_empty() {
        return spec.list_url.clone();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, URL_COMPONENT)))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if spec.list_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", spec.list_url, sep, query)
}

// ========================
// Collection
// ========================

/// Stamp carried by an outgoing list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub filter: String,
    pub cursor: Cursor,
}

/// What the empty-state region should say, if it is shown at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    Message(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    items: Vec<ResourceItem>,
    filter: String,
    cursor: Cursor,
    has_more: bool,
    loading_more: bool,
    reloading: bool,
    generation: u64,
    load_error: Option<String>,
}

impl Collection {
    pub fn new(pagination: Pagination, filter: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            filter: filter.into(),
            cursor: Cursor::start(pagination),
            has_more: false,
            loading_more: false,
            reloading: false,
            generation: 0,
            load_error: None,
        }
    }

    pub fn items(&self) -> &[ResourceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|i| &i.id == id)
    }

    /// Current page number in page mode
    pub fn page(&self) -> Option<u32> {
        match self.cursor {
            Cursor::Page { page, .. } => Some(page),
            _ => None,
        }
    }

    /// The whole collection is on screen (infinite scroll only)
    pub fn at_end(&self) -> bool {
        matches!(self.cursor, Cursor::Offset { .. }) && !self.has_more && !self.reloading && !self.items.is_empty()
    }

    /// Shown exactly when the cache is empty and nothing is being fetched
    pub fn empty_state(&self, spec: &PanelSpec) -> Option<EmptyState> {
        if !self.items.is_empty() || self.reloading {
            return None;
        }
        Some(match &self.load_error {
            Some(message) => EmptyState::Error(message.clone()),
            None => EmptyState::Message(spec.empty_message(&self.filter)),
        })
    }

    /// Drop the cache and start over at the first page of `filter`
    pub fn begin_reload(&mut self, filter: impl Into<String>) -> FetchTicket {
        self.filter = filter.into();
        let cursor = self.cursor.rewind();
        self.begin_fresh(cursor)
    }

    /// Replace the cache with page `page` of the current filter
    pub fn begin_page(&mut self, page: u32) -> FetchTicket {
        let cursor = match self.cursor {
            Cursor::Page { per_page, .. } => Cursor::Page { page: page.max(1), per_page },
            other => other.rewind(),
        };
        self.begin_fresh(cursor)
    }

    fn begin_fresh(&mut self, cursor: Cursor) -> FetchTicket {
        self.generation += 1;
        self.items.clear();
        self.cursor = cursor;
        self.has_more = false;
        self.loading_more = false;
        self.reloading = true;
        self.load_error = None;
        self.ticket()
    }

    fn ticket(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            filter: self.filter.clone(),
            cursor: self.cursor,
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a reload or page response. False when it arrived stale.
    pub fn apply_reload(&mut self, ticket: &FetchTicket, result: Result<Page, RequestError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.reloading = false;
        match result {
            Ok(page) => {
                self.items.clear();
                self.append(page);
            }
            Err(e) => self.load_error = Some(e.user_message()),
        }
        true
    }

    /// Claim the load-more slot. None when a load is running, a reload is
    /// pending, or the server said there is nothing more.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.loading_more || self.reloading || !self.has_more {
            return None;
        }
        if !matches!(self.cursor, Cursor::Offset { .. }) {
            return None;
        }
        self.loading_more = true;
        Some(self.ticket())
    }

    /// Apply a load-more response. False when it arrived stale, in which
    /// case nothing (including `loading_more`) is touched.
    pub fn apply_load_more(&mut self, ticket: &FetchTicket, result: Result<Page, RequestError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading_more = false;
        if let Ok(page) = result {
            self.append(page);
        }
        true
    }

    fn append(&mut self, page: Page) {
        for item in page.items {
            if !self.contains(&item.id) {
                self.items.push(item);
            }
        }
        self.cursor.shift(page.returned as i64);
        self.has_more = page.has_more;
    }

    /// Prepend a freshly created item
    pub fn insert_at_top(&mut self, item: ResourceItem) {
        if let Some(pos) = self.items.iter().position(|i| i.id == item.id) {
            self.items.remove(pos);
        } else {
            self.cursor.shift(1);
        }
        self.items.insert(0, item);
        self.load_error = None;
    }

    /// Swap an item in place, keeping its position
    pub fn replace(&mut self, id: &ItemId, item: ResourceItem) -> Result<(), SyncError> {
        let slot = self
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| SyncError::NotFoundLocally(id.clone()))?;
        *slot = item;
        Ok(())
    }

    /// Remove an item if cached. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let Some(pos) = self.items.iter().position(|i| &i.id == id) else {
            return false;
        };
        self.items.remove(pos);
        self.cursor.shift(-1);
        true
    }
}

// ========================
// Engine
// ========================

/// Result of a fetch-driven operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Guard refused (already loading, nothing more, ...); no request sent
    Skipped,
    Applied,
    /// Superseded while in flight; discarded
    Stale,
    Failed(RequestError),
}

/// Reactive handle over one panel's collection
#[derive(Clone, Copy)]
pub struct ListSyncEngine {
    state: RwSignal<Collection>,
    gateway: StoredValue<HttpGateway, LocalStorage>,
    spec: StoredValue<PanelSpec>,
}

impl ListSyncEngine {
    pub fn new(spec: PanelSpec, gateway: HttpGateway) -> Self {
        let collection = Collection::new(spec.pagination, spec.initial_filter());
        Self {
            state: RwSignal::new(collection),
            gateway: StoredValue::new_local(gateway),
            spec: StoredValue::new(spec),
        }
    }

    pub fn state(&self) -> RwSignal<Collection> {
        self.state
    }

    fn kind(&self) -> ResourceKind {
        self.spec.with_value(|s| s.kind)
    }

    fn tag(&self) -> &'static str {
        self.kind().slug()
    }

    pub async fn reload(&self, filter: impl Into<String>) -> LoadOutcome {
        let filter = filter.into();
        let Some(ticket) = self.state.try_update(|c| c.begin_reload(filter)) else {
            return LoadOutcome::Skipped;
        };
        log::info!("[SYNC:{}] reload filter={:?}", self.tag(), ticket.filter);
        self.settle_fresh(ticket).await
    }

    pub async fn reload_current(&self) -> LoadOutcome {
        let filter = self.state.with_untracked(|c| c.filter().to_string());
        self.reload(filter).await
    }

    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        let Some(ticket) = self.state.try_update(|c| c.begin_page(page)) else {
            return LoadOutcome::Skipped;
        };
        log::info!("[SYNC:{}] load page {:?}", self.tag(), ticket.cursor);
        self.settle_fresh(ticket).await
    }

    async fn settle_fresh(&self, ticket: FetchTicket) -> LoadOutcome {
        let result = self.fetch(&ticket).await;
        let failure = result.as_ref().err().cloned();

        let applied = self.state.try_update(|c| c.apply_reload(&ticket, result)).unwrap_or(false);
        if !applied {
            log::warn!("[SYNC:{}] discarded stale list response", self.tag());
            return LoadOutcome::Stale;
        }
        match failure {
            Some(e) => {
                log::error!("[SYNC:{}] load failed: {}", self.tag(), e);
                LoadOutcome::Failed(e)
            }
            None => LoadOutcome::Applied,
        }
    }

    /// Fetch the next page and append it. Idempotent while a load is in
    /// flight or when the collection is exhausted.
    pub async fn load_more(&self) -> LoadOutcome {
        let Some(ticket) = self.state.try_update(|c| c.begin_load_more()).flatten() else {
            return LoadOutcome::Skipped;
        };
        log::debug!("[SYNC:{}] load more at {:?}", self.tag(), ticket.cursor);

        let result = self.fetch(&ticket).await;
        let failure = result.as_ref().err().cloned();

        let applied = self.state.try_update(|c| c.apply_load_more(&ticket, result)).unwrap_or(false);
        if !applied {
            log::warn!("[SYNC:{}] discarded stale load-more response", self.tag());
            return LoadOutcome::Stale;
        }
        match failure {
            Some(e) => {
                log::error!("[SYNC:{}] load more failed: {}", self.tag(), e);
                LoadOutcome::Failed(e)
            }
            None => LoadOutcome::Applied,
        }
    }

    async fn fetch(&self, ticket: &FetchTicket) -> Result<Page, RequestError> {
        let (url, kind) = self
            .spec
            .with_value(|s| (list_url(s, &ticket.filter, &ticket.cursor), s.kind));
        let gateway = self.gateway.get_value();
        let value = gateway.get(&url).await?;
        parse_page(kind, &value)
    }

    pub fn insert_at_top(&self, item: ResourceItem) {
        log::debug!("[SYNC:{}] insert {}", self.tag(), item.id);
        self.state.update(|c| c.insert_at_top(item));
    }

    /// Insert server-rendered card markup. Markup without an id cannot be
    /// tracked, so the collection is reloaded instead.
    pub async fn insert_html(&self, html: &str) -> LoadOutcome {
        match ResourceItem::from_card_html(self.kind(), html, None) {
            Some(item) => {
                self.insert_at_top(item);
                LoadOutcome::Applied
            }
            None => {
                log::warn!("[SYNC:{}] card markup has no data-id; reloading", self.tag());
                self.reload_current().await
            }
        }
    }

    /// Swap an item in place, or reload when it is no longer cached
    pub async fn replace(&self, id: &ItemId, item: ResourceItem) -> LoadOutcome {
        let result = self
            .state
            .try_update(|c| c.replace(id, item))
            .unwrap_or_else(|| Err(SyncError::NotFoundLocally(id.clone())));
        match result {
            Ok(()) => {
                log::debug!("[SYNC:{}] replaced {}", self.tag(), id);
                LoadOutcome::Applied
            }
            Err(e) => {
                log::warn!("[SYNC:{}] {}; reloading", self.tag(), e);
                self.reload_current().await
            }
        }
    }

    pub fn remove(&self, id: &ItemId) -> bool {
        let removed = self.state.try_update(|c| c.remove(id)).unwrap_or(false);
        log::debug!("[SYNC:{}] remove {} (cached: {})", self.tag(), id, removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::{json, Value};

    use super::*;
    use crate::config::AppConfig;
    use crate::gateway::testing::{gateway, ScriptedTransport};

    fn review_spec(pagination: Pagination) -> PanelSpec {
        let mut spec = AppConfig::default().panels[0].clone();
        spec.pagination = pagination;
        spec
    }

    fn engine_with(transport: &Rc<ScriptedTransport>, pagination: Pagination) -> ListSyncEngine {
        ListSyncEngine::new(review_spec(pagination), gateway(transport))
    }

    fn engine(transport: &Rc<ScriptedTransport>) -> ListSyncEngine {
        engine_with(transport, Pagination::Offset { limit: 2 })
    }

    fn review(id: u64) -> Value {
        json!({ "pk": id, "venue_name": format!("Venue {id}"), "rating": 4 })
    }

    fn page(ids: &[u64], has_more: bool) -> Value {
        let items: Vec<Value> = ids.iter().map(|id| review(*id)).collect();
        json!({ "success": true, "items": items, "has_more": has_more })
    }

    fn ids(engine: &ListSyncEngine) -> Vec<String> {
        engine
            .state()
            .with_untracked(|c| c.items().iter().map(|i| i.id.to_string()).collect())
    }

    fn item(id: u64) -> ResourceItem {
        ResourceItem::new(ResourceKind::Review, ItemId::from(id), format!("Venue {id}"))
    }

    #[test]
    fn list_url_encodes_filter_and_cursor() {
        let spec = review_spec(Pagination::Offset { limit: 10 });
        let url = list_url(&spec, "my_reviews", &Cursor::Offset { offset: 20, limit: 10 });
        assert_eq!(url, "/reviews/get-reviews/?filter=my_reviews&offset=20&limit=10");

        let url = list_url(&spec, "a b&c", &Cursor::Whole);
        assert_eq!(url, "/reviews/get-reviews/?filter=a%20b%26c");

        assert_eq!(list_url(&spec, "", &Cursor::Whole), "/reviews/get-reviews/");
    }

    #[test]
    fn reload_then_scroll_to_end() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        let spec = review_spec(Pagination::Offset { limit: 2 });

        transport.reply(200, page(&[1, 2], true));
        assert_eq!(block_on(engine.reload("all")), LoadOutcome::Applied);
        assert_eq!(ids(&engine), ["1", "2"]);
        assert_eq!(engine.state().with_untracked(|c| c.empty_state(&spec)), None);

        transport.reply(200, page(&[3], false));
        assert_eq!(block_on(engine.load_more()), LoadOutcome::Applied);
        assert_eq!(ids(&engine), ["1", "2", "3"]);
        assert!(engine.state().with_untracked(Collection::at_end));

        assert_eq!(block_on(engine.load_more()), LoadOutcome::Skipped);
        assert_eq!(
            transport.urls(),
            [
                "/reviews/get-reviews/?filter=all&offset=0&limit=2",
                "/reviews/get-reviews/?filter=all&offset=2&limit=2",
            ]
        );
    }

    #[test]
    fn rapid_load_more_sends_one_request() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1, 2], true));
        block_on(engine.reload("all"));

        let reply = transport.defer();
        let mut pool = LocalPool::new();
        for _ in 0..5 {
            pool.spawner()
                .spawn_local(async move {
                    engine.load_more().await;
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(transport.request_count(), 2);
        assert!(engine.state().with_untracked(Collection::is_loading_more));

        reply.resolve(200, page(&[3, 4], true));
        pool.run();
        assert_eq!(transport.request_count(), 2);
        assert_eq!(ids(&engine), ["1", "2", "3", "4"]);
        assert!(!engine.state().with_untracked(Collection::is_loading_more));
    }

    #[test]
    fn stale_load_more_after_reload_is_discarded() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1, 2], true));
        block_on(engine.reload("all"));

        let late = transport.defer();
        let mut pool = LocalPool::new();
        let outcome = Rc::new(std::cell::RefCell::new(None));
        let slot = Rc::clone(&outcome);
        pool.spawner()
            .spawn_local(async move {
                *slot.borrow_mut() = Some(engine.load_more().await);
            })
            .unwrap();
        pool.run_until_stalled();

        transport.reply(200, page(&[7], false));
        assert_eq!(block_on(engine.reload("my_reviews")), LoadOutcome::Applied);

        late.resolve(200, page(&[3, 4], true));
        pool.run();

        assert_eq!(*outcome.borrow(), Some(LoadOutcome::Stale));
        assert_eq!(ids(&engine), ["7"]);
        let state = engine.state().get_untracked();
        assert!(!state.is_loading_more());
        assert!(!state.has_more());
        assert_eq!(state.filter(), "my_reviews");
    }

    #[test]
    fn duplicate_ids_are_not_appended_twice() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1, 2], true));
        block_on(engine.reload("all"));

        transport.reply(200, page(&[2, 3], false));
        block_on(engine.load_more());
        assert_eq!(ids(&engine), ["1", "2", "3"]);
        assert_eq!(
            engine.state().with_untracked(Collection::cursor),
            Cursor::Offset { offset: 4, limit: 2 }
        );
    }

    #[test]
    fn inserts_and_removals_keep_offset_aligned() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1, 2], true));
        block_on(engine.reload("all"));

        engine.insert_at_top(item(9));
        assert_eq!(ids(&engine), ["9", "1", "2"]);
        assert!(engine.remove(&ItemId::from(1)));
        assert!(engine.remove(&ItemId::from(2)));
        // Removing an absent id is fine and does not move the cursor
        assert!(!engine.remove(&ItemId::from(2)));

        transport.reply(200, page(&[3], false));
        block_on(engine.load_more());
        assert_eq!(transport.urls()[1], "/reviews/get-reviews/?filter=all&offset=1&limit=2");
        assert_eq!(ids(&engine), ["9", "3"]);
    }

    #[test]
    fn empty_state_tracks_cache_length() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        let spec = review_spec(Pagination::Offset { limit: 2 });
        transport.reply(200, page(&[1], false));
        block_on(engine.reload("my_reviews"));

        assert!(engine.remove(&ItemId::from(1)));
        assert_eq!(
            engine.state().with_untracked(|c| c.empty_state(&spec)),
            Some(EmptyState::Message("You have not written any reviews yet.".to_string()))
        );

        engine.insert_at_top(item(5));
        assert_eq!(engine.state().with_untracked(|c| c.empty_state(&spec)), None);
    }

    #[test]
    fn failed_reload_shows_error_in_empty_state() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        let spec = review_spec(Pagination::Offset { limit: 2 });
        transport.fail_network();

        assert!(matches!(block_on(engine.reload("all")), LoadOutcome::Failed(RequestError::Network(_))));
        let state = engine.state().get_untracked();
        assert!(state.is_empty());
        assert!(matches!(state.empty_state(&spec), Some(EmptyState::Error(_))));
    }

    #[test]
    fn missing_has_more_is_a_failure_not_a_guess() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, json!({ "success": true, "items": [review(1)] }));

        assert!(matches!(block_on(engine.reload("all")), LoadOutcome::Failed(_)));
        assert!(ids(&engine).is_empty());
        assert_eq!(block_on(engine.load_more()), LoadOutcome::Skipped);
    }

    #[test]
    fn replace_in_place_keeps_position() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1, 2], false));
        block_on(engine.reload("all"));

        let mut edited = item(1);
        edited.title = "Renamed".to_string();
        assert_eq!(block_on(engine.replace(&ItemId::from(1), edited)), LoadOutcome::Applied);

        let titles: Vec<String> = engine
            .state()
            .with_untracked(|c| c.items().iter().map(|i| i.title.clone()).collect());
        assert_eq!(titles, ["Renamed", "Venue 2"]);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn replace_of_unknown_id_reloads_once() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1, 2], false));
        block_on(engine.reload("my_reviews"));

        transport.reply(200, page(&[8, 1], false));
        assert_eq!(block_on(engine.replace(&ItemId::from(8), item(8))), LoadOutcome::Applied);

        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.urls()[1], "/reviews/get-reviews/?filter=my_reviews&offset=0&limit=2");
        assert_eq!(ids(&engine), ["8", "1"]);
    }

    #[test]
    fn card_markup_without_id_triggers_reload() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine(&transport);
        transport.reply(200, page(&[1], false));
        block_on(engine.reload("all"));

        block_on(engine.insert_html(r#"<div class="card" data-id="4">x</div>"#));
        assert_eq!(ids(&engine), ["4", "1"]);
        assert_eq!(transport.request_count(), 1);

        transport.reply(200, page(&[5, 4, 1], false));
        block_on(engine.insert_html(r#"<div class="card">x</div>"#));
        assert_eq!(transport.request_count(), 2);
        assert_eq!(ids(&engine), ["5", "4", "1"]);
    }

    #[test]
    fn page_mode_replaces_cache_per_page() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine_with(&transport, Pagination::Pages { per_page: 9 });

        transport.reply(200, page(&[1, 2], true));
        block_on(engine.reload("all"));
        transport.reply(200, page(&[3], false));
        assert_eq!(block_on(engine.load_page(2)), LoadOutcome::Applied);

        assert_eq!(ids(&engine), ["3"]);
        assert_eq!(engine.state().with_untracked(Collection::page), Some(2));
        assert_eq!(transport.urls()[1], "/reviews/get-reviews/?filter=all&page=2&per_page=9");
        // Page mode never appends on scroll
        assert_eq!(block_on(engine.load_more()), LoadOutcome::Skipped);
    }

    #[test]
    fn plain_array_endpoint_is_the_whole_collection() {
        let transport = Rc::new(ScriptedTransport::default());
        let engine = engine_with(&transport, Pagination::None);
        transport.reply(200, json!([review(1), review(2)]));

        block_on(engine.reload("all"));
        assert_eq!(ids(&engine), ["1", "2"]);
        assert_eq!(transport.urls()[0], "/reviews/get-reviews/?filter=all");
        assert_eq!(block_on(engine.load_more()), LoadOutcome::Skipped);
    }
}
