//! Confirm Delete Component
//!
//! Body of the delete confirmation dialog. Deleting only ever happens
//! from its confirm button.

use leptos::prelude::*;

/// # Arguments
/// * `noun` - what is being deleted ("review", "booking", ...)
/// * `busy` - the delete request is in flight
#[component]
pub fn ConfirmDelete(
    #[prop(into)] noun: String,
    #[prop(into)] title: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let question = if title.is_empty() {
        format!("Delete this {}?", noun)
    } else {
        format!("Delete {} \"{}\"?", noun, title)
    };

    view! {
        <div class="delete-confirm">
            <p class="delete-confirm-text">{question}</p>
            <p class="delete-confirm-hint">"This cannot be undone."</p>
            <div class="delete-confirm-actions">
                <button
                    class="cancel-btn"
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_cancel.run(());
                    }
                >
                    "Cancel"
                </button>
                <button
                    class="confirm-btn danger"
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    <Show when=move || busy.get() fallback=|| "Delete">
                        <span class="spinner"></span>
                        " Deleting..."
                    </Show>
                </button>
            </div>
        </div>
    }
}
