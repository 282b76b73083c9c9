//! Modal Host Component
//!
//! The dialog surface of one panel. Escape and overlay clicks close it
//! only while it is open.

use leptos::prelude::*;
use leptos::task::spawn_local;
use panel_events::{bind_global_key, is_overlay_click, CLOSE_KEY};

use crate::components::{ConfirmDelete, ItemDetail, ResourceForm};
use crate::modal::{ModalContent, ModalMode};
use crate::panel::PanelController;

#[component]
pub fn ModalHost(panel: PanelController) -> impl IntoView {
    let modal = panel.modal();
    let state = modal.state();
    let noun = panel.kind().noun();

    bind_global_key(CLOSE_KEY, move || {
        if modal.is_open() {
            panel.request_close();
        }
    });

    let content = Memo::new(move |_| state.with(|m| m.content.clone()));
    let heading = move || {
        state.with(|m| match m.mode {
            Some(ModalMode::View) => format!("{} details", capitalize(noun)),
            Some(ModalMode::Create) => format!("New {}", noun),
            Some(ModalMode::Edit) => format!("Edit {}", noun),
            Some(ModalMode::ConfirmDelete) => format!("Delete {}", noun),
            None => String::new(),
        })
    };
    let on_overlay = move |ev: web_sys::MouseEvent| {
        if is_overlay_click(&ev) {
            panel.request_close();
        }
    };

    view! {
        <div class=move || state.with(|m| m.class()) on:click=on_overlay>
            <div class="modal-dialog" role="dialog" aria-modal="true">
                <header class="modal-header">
                    <h2>{heading}</h2>
                    <button
                        class="modal-close"
                        disabled=move || panel.state().with(|s| s.submitting || s.deleting)
                        on:click=move |_| panel.request_close()
                    >
                        "×"
                    </button>
                </header>
                <div class="modal-content">
                    {move || match content.get() {
                        ModalContent::Empty => ().into_any(),
                        ModalContent::Loading => view! {
                            <div class="modal-loading"><span class="spinner"></span>" Loading..."</div>
                        }
                        .into_any(),
                        ModalContent::Detail(item) => view! { <ItemDetail item=item /> }.into_any(),
                        ModalContent::Form => view! { <ResourceForm panel=panel /> }.into_any(),
                        ModalContent::ConfirmDelete { title, .. } => view! {
                            <ConfirmDelete
                                noun=noun
                                title=title
                                busy=Signal::derive(move || panel.state().with(|s| s.deleting))
                                on_confirm=move |_| spawn_local(async move { panel.confirm_delete().await })
                                on_cancel=move |_| panel.request_close()
                            />
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
