//! Panel Tab Bar Component
//!
//! Switches which panel is shown. Hidden panels keep their state and
//! scroll position.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PanelTabBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let tabs: Vec<(usize, String)> = ctx
        .panels()
        .iter()
        .enumerate()
        .map(|(index, panel)| (index, panel.spec().with_value(|s| s.title.clone())))
        .collect();

    view! {
        <nav class="panel-tab-bar">
            <For
                each=move || tabs.clone()
                key=|(index, _)| *index
                children=move |(index, title)| {
                    let is_active = move || store.active_panel().get() == index;
                    let tab_class = move || if is_active() { "panel-tab active" } else { "panel-tab" };

                    view! {
                        <button class=tab_class on:click=move |_| *store.active_panel().write() = index>
                            {title}
                        </button>
                    }
                }
            />
        </nav>
    }
}
