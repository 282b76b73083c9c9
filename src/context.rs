//! Application Context
//!
//! Page-wide handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::gateway::{DocumentTokenSource, FetchTransport, HttpGateway};
use crate::panel::PanelController;
use crate::schedule::{BrowserScheduler, Scheduler};
use crate::store::AppStore;
use crate::toast::ToastQueue;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub toasts: ToastQueue,
    /// One controller per configured panel, in tab order
    pub panels: StoredValue<Vec<PanelController>>,
    /// Distance from the bottom (px) at which a panel loads more
    pub scroll_threshold: i32,
}

impl AppContext {
    pub fn new(config: &AppConfig, store: AppStore) -> Self {
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::default());
        let tokens = Rc::new(DocumentTokenSource::new(&config.csrf_cookie, &config.csrf_field));
        let gateway = HttpGateway::new(Rc::new(FetchTransport), tokens, config.csrf_header.clone());
        let toasts = ToastQueue::new(store, scheduler.clone(), config.toast_duration_ms, config.toast_fade_ms);

        let panels = config
            .panels
            .iter()
            .cloned()
            .map(|spec| {
                log::debug!("[APP] panel {} -> {}", spec.kind.slug(), spec.list_url);
                PanelController::new(spec, gateway.clone(), toasts, scheduler.clone(), config.modal_settle_ms)
            })
            .collect();

        Self {
            toasts,
            panels: StoredValue::new(panels),
            scroll_threshold: config.scroll_threshold_px,
        }
    }

    pub fn panels(&self) -> Vec<PanelController> {
        self.panels.get_value()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
