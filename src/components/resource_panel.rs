//! Resource Panel Component
//!
//! One panel: header, filter bar, the scrollable card list with its
//! loading/end/empty indicators, page controls, and the panel's dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use panel_events::make_on_scroll;
use wasm_bindgen::JsCast;

use crate::components::{ModalHost, ResourceCard};
use crate::config::Pagination;
use crate::context::use_app_context;
use crate::list_sync::EmptyState;
use crate::models::ItemId;
use crate::panel::PanelController;

#[component]
fn FilterBar(panel: PanelController) -> impl IntoView {
    let filters = panel.spec().with_value(|s| s.filters.clone());
    if filters.len() < 2 {
        return ().into_any();
    }
    let state = panel.state();

    view! {
        <div class="filter-bar">
            {filters
                .into_iter()
                .map(|filter| {
                    let key = filter.key.clone();
                    let active_key = filter.key;
                    let class = move || {
                        if state.with(|s| s.current_filter == active_key) { "filter-btn active" } else { "filter-btn" }
                    };
                    view! {
                        <button
                            class=class
                            on:click=move |_| {
                                let key = key.clone();
                                spawn_local(async move {
                                    panel.switch_filter(key).await;
                                });
                            }
                        >
                            {filter.label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn PageControls(panel: PanelController) -> impl IntoView {
    let collection = panel.engine().state();
    let page = move || collection.with(|c| c.page().unwrap_or(1));
    let busy = move || collection.with(|c| c.is_reloading());

    let go = move |target: u32| {
        spawn_local(async move {
            panel.go_to_page(target).await;
        });
    };

    view! {
        <div class="pagination">
            <button
                class="page-btn"
                disabled=move || busy() || page() <= 1
                on:click=move |_| go(page().saturating_sub(1).max(1))
            >
                "‹ Prev"
            </button>
            <span class="page-label">{move || format!("Page {}", page())}</span>
            <button
                class="page-btn"
                disabled=move || busy() || !collection.with(|c| c.has_more())
                on:click=move |_| go(page() + 1)
            >
                "Next ›"
            </button>
        </div>
    }
}

#[component]
pub fn ResourcePanel(panel: PanelController, #[prop(into)] visible: Signal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let spec = panel.spec();
    let collection = panel.engine().state();
    let title = spec.with_value(|s| s.title.clone());
    let can_create = spec.with_value(|s| s.can_create());
    let paged = spec.with_value(|s| matches!(s.pagination, Pagination::Pages { .. }));

    let on_scroll = make_on_scroll(ctx.scroll_threshold, move || {
        if collection.with_untracked(|c| c.has_more() && !c.is_loading_more()) {
            spawn_local(async move {
                panel.load_more().await;
            });
        }
    });

    // One listener for every card control, including server-rendered cards
    let on_list_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        let Ok(Some(control)) = target.closest("[data-action]") else {
            return;
        };
        let (Some(action), Some(id)) = (control.get_attribute("data-action"), control.get_attribute("data-id")) else {
            return;
        };
        ev.prevent_default();
        let id = ItemId::new(id);
        match action.as_str() {
            "view" => spawn_local(async move { panel.open_view(id).await }),
            "edit" => spawn_local(async move { panel.open_edit(id).await }),
            "delete" => panel.request_delete(id),
            other => log::debug!("[PANEL:{}] ignoring action {:?}", panel.kind().slug(), other),
        }
    };

    let empty_state = move || collection.with(|c| spec.with_value(|s| c.empty_state(s)));

    view! {
        <section class="resource-panel" class:hidden=move || !visible.get()>
            <header class="panel-header">
                <h2>{title}</h2>
                <span class="item-count">{move || format!("{} items", collection.with(|c| c.len()))}</span>
                {can_create.then(|| view! {
                    <button class="add-btn" on:click=move |_| panel.open_create()>"+ Add"</button>
                })}
            </header>

            <FilterBar panel=panel />

            <div class="panel-scroll" on:scroll=on_scroll>
                <div class="card-list" on:click=on_list_click>
                    <For
                        each=move || collection.with(|c| c.items().to_vec())
                        key=|item| item.clone()
                        children=|item| view! { <ResourceCard item=item /> }
                    />
                </div>

                <Show when=move || collection.with(|c| c.is_reloading() || c.is_loading_more())>
                    <div class="list-loading"><span class="spinner"></span>" Loading..."</div>
                </Show>
                <Show when=move || collection.with(|c| c.at_end())>
                    <p class="list-end">"You've reached the end."</p>
                </Show>
                {move || empty_state().map(|state| match state {
                    EmptyState::Message(msg) => view! { <p class="empty-state">{msg}</p> }.into_any(),
                    EmptyState::Error(msg) => view! { <p class="empty-state error">{msg}</p> }.into_any(),
                })}
            </div>

            {paged.then(|| view! { <PageControls panel=panel /> })}

            <ModalHost panel=panel />
        </section>
    }
}
