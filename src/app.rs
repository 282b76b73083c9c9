//! Lapa Frontend App
//!
//! Tab bar over the configured resource panels, plus the toast stack.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{PanelTabBar, ResourcePanel, ToastHost};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let ctx = AppContext::new(&config, store);
    provide_context(ctx);

    // Every panel loads its initial filter right away; hidden ones included
    for panel in ctx.panels() {
        spawn_local(async move {
            panel.init().await;
        });
    }

    let panels = ctx
        .panels()
        .into_iter()
        .enumerate()
        .map(|(index, panel)| {
            let visible = Signal::derive(move || store.active_panel().get() == index);
            view! { <ResourcePanel panel=panel visible=visible /> }
        })
        .collect_view();

    view! {
        <div class="app-layout">
            <PanelTabBar />
            <main class="panels">{panels}</main>
            <ToastHost />
        </div>
    }
}
