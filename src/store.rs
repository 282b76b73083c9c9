//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Only state that
//! is genuinely page-wide lives here; each panel owns its own collection
//! and modal state.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::toast::ToastList;

/// Page-wide state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Stacked notifications, oldest first
    pub toasts: ToastList,
    /// Index of the panel whose tab is selected
    pub active_panel: usize,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
