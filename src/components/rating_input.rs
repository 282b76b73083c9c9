//! Rating Input Component
//!
//! Five clickable stars with hover preview over a [`RatingState`].

use leptos::prelude::*;

use crate::rating::{RatingState, MAX_RATING};

#[component]
pub fn RatingInput(rating: RwSignal<RatingState>) -> impl IntoView {
    view! {
        <div class="rating-input" on:mouseleave=move |_| rating.update(|r| r.leave())>
            {(1..=MAX_RATING)
                .map(|star| {
                    view! {
                        <button
                            type="button"
                            class=move || if rating.with(|r| r.is_filled(star)) { "star filled" } else { "star" }
                            aria-label=format!("{} star", star)
                            on:click=move |_| rating.update(|r| r.click(star))
                            on:mouseenter=move |_| rating.update(|r| r.hover(star))
                        >
                            "★"
                        </button>
                    }
                })
                .collect_view()}
            <input type="hidden" name="rating" prop:value=move || rating.with(|r| r.value().to_string()) />
            <span class="rating-description">
                {move || rating.with(RatingState::description).unwrap_or_default()}
            </span>
        </div>
    }
}
