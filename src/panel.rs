//! Panel Controller
//!
//! One resource's browse and CRUD surface: filter switching, scrolling,
//! view/edit/delete dialogs and form submission, wired onto a
//! [`ListSyncEngine`], a [`ModalController`] and the shared [`ToastQueue`].
//!
//! The list only changes after the server has confirmed a mutation.

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::PanelSpec;
use crate::forms::{has_rating, FormMode, FormState, FormValues};
use crate::gateway::{parse_detail, parse_mutation, HttpGateway, MutationResult, RequestError};
use crate::list_sync::{ListSyncEngine, LoadOutcome};
use crate::modal::{ModalContent, ModalController, ModalMode};
use crate::models::{ItemId, ResourceItem, ResourceKind};
use crate::rating::RatingState;
use crate::schedule::Scheduler;
use crate::toast::{ToastKind, ToastQueue};

/// Per-panel state that is not the collection itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    /// Filter shown as active; set on click, before the reload answers
    pub current_filter: String,
    /// Target of the open delete confirmation
    pub pending_delete: Option<ItemId>,
    pub submitting: bool,
    pub deleting: bool,
}

#[derive(Clone, Copy)]
pub struct PanelController {
    spec: StoredValue<PanelSpec>,
    state: RwSignal<PanelState>,
    engine: ListSyncEngine,
    modal: ModalController,
    toasts: ToastQueue,
    gateway: StoredValue<HttpGateway, LocalStorage>,
    form: RwSignal<FormState>,
    create_rating: RwSignal<RatingState>,
    edit_rating: RwSignal<RatingState>,
}

impl PanelController {
    pub fn new(
        spec: PanelSpec,
        gateway: HttpGateway,
        toasts: ToastQueue,
        scheduler: Rc<dyn Scheduler>,
        settle_ms: u32,
    ) -> Self {
        let state = PanelState {
            current_filter: spec.initial_filter(),
            ..PanelState::default()
        };
        Self {
            engine: ListSyncEngine::new(spec.clone(), gateway.clone()),
            modal: ModalController::new(scheduler, settle_ms),
            spec: StoredValue::new(spec),
            state: RwSignal::new(state),
            toasts,
            gateway: StoredValue::new_local(gateway),
            form: RwSignal::new(FormState::default()),
            create_rating: RwSignal::new(RatingState::default()),
            edit_rating: RwSignal::new(RatingState::default()),
        }
    }

    pub fn spec(&self) -> StoredValue<PanelSpec> {
        self.spec
    }

    pub fn state(&self) -> RwSignal<PanelState> {
        self.state
    }

    pub fn engine(&self) -> ListSyncEngine {
        self.engine
    }

    pub fn modal(&self) -> ModalController {
        self.modal
    }

    pub fn form(&self) -> RwSignal<FormState> {
        self.form
    }

    /// Rating widget backing the open form; create and edit never share one
    pub fn rating(&self) -> RwSignal<RatingState> {
        match self.form.with_untracked(|f| f.mode.clone()) {
            Some(FormMode::Edit(_)) => self.edit_rating,
            _ => self.create_rating,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.spec.with_value(|s| s.kind)
    }

    fn tag(&self) -> &'static str {
        self.kind().slug()
    }

    /// A submit or delete is waiting on the server
    pub fn is_busy(&self) -> bool {
        self.state
            .try_with_untracked(|s| s.submitting || s.deleting)
            .unwrap_or(false)
    }

    /// Epoch of the dialog currently on screen, if one is open
    fn open_epoch(&self) -> Option<u64> {
        self.modal
            .state()
            .try_with_untracked(|m| m.is_open().then(|| m.epoch()))
            .flatten()
    }

    /// First load of the initial filter
    pub async fn init(&self) -> LoadOutcome {
        let filter = self.state.with_untracked(|s| s.current_filter.clone());
        self.engine.reload(filter).await
    }

    // ========================
    // Browsing
    // ========================

    pub async fn switch_filter(&self, filter: impl Into<String>) -> LoadOutcome {
        let filter = filter.into();
        log::info!("[PANEL:{}] filter -> {:?}", self.tag(), filter);
        self.state.update(|s| s.current_filter = filter.clone());
        self.engine.reload(filter).await
    }

    /// Scroll reached the bottom region
    pub async fn load_more(&self) -> LoadOutcome {
        self.engine.load_more().await
    }

    pub async fn go_to_page(&self, page: u32) -> LoadOutcome {
        self.engine.load_page(page).await
    }

    fn cached(&self, id: &ItemId) -> Option<ResourceItem> {
        self.engine
            .state()
            .with_untracked(|c| c.items().iter().find(|i| &i.id == id).cloned())
    }

    async fn fetch_detail(&self, id: &ItemId) -> Result<ResourceItem, RequestError> {
        let Some(url) = self.spec.with_value(|s| s.detail_url(id)) else {
            return self.cached(id).ok_or_else(|| RequestError::Server {
                status: 404,
                message: format!("{} {} is not loaded", self.kind().noun(), id),
            });
        };
        let gateway = self.gateway.get_value();
        let value = gateway.get(&url).await?;
        parse_detail(self.kind(), &value)
    }

    // ========================
    // Dialogs
    // ========================

    pub async fn open_view(&self, id: ItemId) {
        let epoch = self.modal.open(ModalMode::View, Some(id.clone()), ModalContent::Loading);
        match self.fetch_detail(&id).await {
            Ok(item) => {
                self.modal.set_content(epoch, ModalContent::Detail(item));
            }
            Err(e) => {
                log::error!("[PANEL:{}] detail {} failed: {}", self.tag(), id, e);
                self.toasts.error(e.user_message());
                if self.modal.is_current(epoch) {
                    self.close_modal();
                }
            }
        }
    }

    pub fn open_create(&self) {
        let kind = self.kind();
        self.form.set(FormState::create(kind));
        self.create_rating.update(|r| r.reset_for_form(None));
        self.modal.open(ModalMode::Create, None, ModalContent::Form);
    }

    /// Open the edit form and fill it from the item detail
    pub async fn open_edit(&self, id: ItemId) {
        let kind = self.kind();
        self.form.set(FormState::edit(kind, id.clone()));
        let epoch = self.modal.open(ModalMode::Edit, Some(id.clone()), ModalContent::Form);

        match self.fetch_detail(&id).await {
            Ok(item) if self.modal.is_current(epoch) => {
                self.edit_rating.update(|r| r.reset_for_form(item.rating));
                self.form.update(|f| {
                    f.values = FormValues::prefill(&item);
                    f.loading = false;
                });
            }
            Ok(_) => log::debug!("[PANEL:{}] edit form for {} closed before detail arrived", self.tag(), id),
            Err(e) => {
                log::error!("[PANEL:{}] detail {} failed: {}", self.tag(), id, e);
                self.toasts.error(e.user_message());
                if self.modal.is_current(epoch) {
                    self.close_modal();
                }
            }
        }
    }

    /// Ask before deleting; nothing is sent until confirmed
    pub fn request_delete(&self, id: ItemId) {
        let title = self.cached(&id).map(|i| i.title).unwrap_or_default();
        self.state.update(|s| s.pending_delete = Some(id.clone()));
        self.modal.open(
            ModalMode::ConfirmDelete,
            Some(id.clone()),
            ModalContent::ConfirmDelete { id, title },
        );
    }

    /// Close from a user gesture (button, overlay, Escape); ignored while a
    /// request started from the dialog is still in flight
    pub fn request_close(&self) {
        if self.is_busy() {
            log::debug!("[PANEL:{}] close ignored: request in flight", self.tag());
            return;
        }
        self.close_modal();
    }

    /// Every close path ends here
    pub fn close_modal(&self) {
        self.state.update(|s| s.pending_delete = None);
        self.modal.close();
    }

    pub async fn confirm_delete(&self) {
        if self.state.with_untracked(|s| s.deleting) {
            return;
        }
        let Some(id) = self.state.with_untracked(|s| s.pending_delete.clone()) else {
            return;
        };
        let Some(url) = self.spec.with_value(|s| s.delete_url(&id)) else {
            log::error!("[PANEL:{}] no delete endpoint configured", self.tag());
            self.close_modal();
            return;
        };

        let epoch = self.open_epoch();
        self.state.update(|s| s.deleting = true);
        let gateway = self.gateway.get_value();
        let kind = self.kind();
        let result = gateway
            .post(&url, None)
            .await
            .and_then(|value| parse_mutation(kind, &value));
        self.state.update(|s| {
            s.deleting = false;
            if s.pending_delete.as_ref() == Some(&id) {
                s.pending_delete = None;
            }
        });
        self.close_if_current(epoch);

        match result {
            Ok(done) => {
                let removed = done.deleted_id.unwrap_or(id);
                log::info!("[PANEL:{}] deleted {}", self.tag(), removed);
                self.engine.remove(&removed);
                self.toasts.success(done.message.unwrap_or_else(|| "Deleted successfully.".to_string()));
            }
            Err(e) => {
                log::error!("[PANEL:{}] delete {} failed: {}", self.tag(), id, e);
                self.toasts.error(e.user_message());
            }
        }
    }

    // ========================
    // Forms
    // ========================

    pub fn set_field(&self, name: &str, value: String) {
        self.form.update(|f| f.values.set(name, value));
    }

    /// Close the dialog opened under `epoch`, if it is still the one on screen
    fn close_if_current(&self, epoch: Option<u64>) {
        match epoch {
            Some(epoch) if self.modal.is_current(epoch) => self.close_modal(),
            _ => log::debug!("[PANEL:{}] dialog changed while request was in flight", self.tag()),
        }
    }

    /// Submit the open form. A submit while one is in flight, or before an
    /// edit form has been filled, is ignored.
    pub async fn submit_form(&self) {
        let Some(mode) = self.form.with_untracked(|f| f.mode.clone()) else {
            return;
        };
        if self.state.with_untracked(|s| s.submitting) {
            log::debug!("[PANEL:{}] submit ignored: already submitting", self.tag());
            return;
        }
        if self.form.with_untracked(|f| f.loading) {
            log::debug!("[PANEL:{}] submit ignored: form still loading", self.tag());
            self.toasts.show("Still loading, please wait.", ToastKind::Info);
            return;
        }
        let epoch = self.open_epoch();
        let url = self.spec.with_value(|s| match &mode {
            FormMode::Create => s.create_url.clone(),
            FormMode::Edit(id) => s.edit_url(id),
        });
        let Some(url) = url else {
            log::error!("[PANEL:{}] no endpoint for {:?}", self.tag(), mode);
            return;
        };

        let kind = self.kind();
        let rating = has_rating(kind).then(|| self.rating().with_untracked(RatingState::value));
        let body = self.form.with_untracked(|f| f.values.to_json(kind, rating));

        self.state.update(|s| s.submitting = true);
        self.form.update(|f| f.errors = Default::default());
        let gateway = self.gateway.get_value();
        let result = gateway
            .post(&url, Some(&body))
            .await
            .and_then(|value| parse_mutation(kind, &value));
        self.state.update(|s| s.submitting = false);

        match result {
            Ok(done) => self.apply_saved(mode, done, epoch).await,
            Err(RequestError::Validation(errors)) if epoch.is_some_and(|e| self.modal.is_current(e)) => {
                log::info!("[PANEL:{}] form rejected: {}", self.tag(), errors);
                self.form.update(|f| f.errors = errors);
            }
            Err(e @ RequestError::Validation(_)) => {
                log::info!("[PANEL:{}] closed form rejected: {}", self.tag(), e);
                self.toasts.error(e.user_message());
            }
            Err(e) => {
                log::error!("[PANEL:{}] submit failed: {}", self.tag(), e);
                self.toasts.error(e.user_message());
            }
        }
    }

    async fn apply_saved(&self, mode: FormMode, done: MutationResult, epoch: Option<u64>) {
        self.close_if_current(epoch);
        let default_message = match mode {
            FormMode::Create => "Created successfully.",
            FormMode::Edit(_) => "Updated successfully.",
        };
        self.toasts.success(done.message.unwrap_or_else(|| default_message.to_string()));

        let kind = self.kind();
        match mode {
            FormMode::Create => match (done.item, done.card_html) {
                (Some(item), _) => self.engine.insert_at_top(item),
                (None, Some(html)) => {
                    self.engine.insert_html(&html).await;
                }
                (None, None) => {
                    self.engine.reload_current().await;
                }
            },
            FormMode::Edit(id) => {
                let updated = done
                    .item
                    .or_else(|| done.card_html.and_then(|h| ResourceItem::from_card_html(kind, &h, Some(id.clone()))));
                match updated {
                    Some(item) => {
                        self.engine.replace(&id, item).await;
                    }
                    None => self.refresh_item(&id).await,
                }
            }
        }
    }

    /// Pull the authoritative copy of an edited item, or reload
    async fn refresh_item(&self, id: &ItemId) {
        match self.fetch_detail(id).await {
            Ok(item) => {
                self.engine.replace(id, item).await;
            }
            Err(e) => {
                log::warn!("[PANEL:{}] refetch of {} failed ({}); reloading", self.tag(), id, e);
                self.engine.reload_current().await;
            }
        }
    }
}
