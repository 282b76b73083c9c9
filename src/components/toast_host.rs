//! Toast Host Component
//!
//! Renders the toast stack from the app store.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=move || store.toasts().get().toasts().to_vec()
                key=|toast| (toast.id, toast.leaving)
                children=move |toast| {
                    let id = toast.id;
                    let class = if toast.leaving {
                        format!("{} leaving", toast.kind.class())
                    } else {
                        toast.kind.class().to_string()
                    };
                    view! {
                        <div class=class role="status">
                            <span class="toast-message">{toast.message}</span>
                            <button class="toast-close" on:click=move |_| ctx.toasts.close(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
