//! Resource Card Component
//!
//! One list entry. Server-rendered markup is shown verbatim; otherwise the
//! card is built from the item fields. Controls carry `data-action` and
//! `data-id` and are handled by the list's delegated click listener.

use leptos::prelude::*;

use crate::format::{image_or_default, long_date, rupiah, short_date, stars, time_range};
use crate::models::ResourceItem;

#[component]
pub fn ResourceCard(item: ResourceItem) -> impl IntoView {
    if let Some(html) = item.card_html.clone() {
        return view! { <div class="card-wrapper" inner_html=html></div> }.into_any();
    }

    let id = item.id.to_string();
    let can_modify = item.can_modify;
    let schedule = item.schedule.clone().unwrap_or_default();
    let when = schedule.date.as_deref().map(long_date);
    let hours = time_range(schedule.start.as_deref(), schedule.end.as_deref());

    view! {
        <article class=format!("resource-card {}-card", item.kind.noun()) data-id=id.clone()>
            <img class="card-image" src=image_or_default(item.image_url.as_deref()) alt=item.title.clone() />
            <div class="card-body">
                <h3 class="card-title">{item.title.clone()}</h3>
                {item.subtitle.clone().map(|s| view! { <p class="card-subtitle">{s}</p> })}
                {item.category.clone().map(|c| view! { <span class="badge">{c}</span> })}
                {item.rating.map(|r| view! { <span class="card-rating" title=format!("{}/5", r)>{stars(r)}</span> })}
                {when.map(|d| view! { <p class="card-date">{d}</p> })}
                {hours.map(|h| view! { <p class="card-time">{h}</p> })}
                {item.price.map(|p| view! { <p class="card-price">{rupiah(p)}</p> })}
                {item.capacity.map(|c| view! { <p class="card-capacity">{format!("Capacity: {}", c)}</p> })}
                {item.body.clone().map(|b| view! { <p class="card-text">{b}</p> })}
                {item.created_at.as_deref().map(short_date).map(|d| view! { <p class="card-created">{d}</p> })}
            </div>
            <div class="card-actions">
                <button class="btn-view" data-action="view" data-id=id.clone()>"View"</button>
                {can_modify.then(|| {
                    let (edit_id, delete_id) = (id.clone(), id.clone());
                    view! {
                        <button class="btn-edit" data-action="edit" data-id=edit_id>"Edit"</button>
                        <button class="btn-delete" data-action="delete" data-id=delete_id>"Delete"</button>
                    }
                })}
            </div>
        </article>
    }
    .into_any()
}

/// Full view of one item inside the view dialog
#[component]
pub fn ItemDetail(item: ResourceItem) -> impl IntoView {
    let schedule = item.schedule.clone().unwrap_or_default();
    let hours = time_range(schedule.start.as_deref(), schedule.end.as_deref());

    view! {
        <div class="item-detail">
            <img class="detail-image" src=image_or_default(item.image_url.as_deref()) alt=item.title.clone() />
            <h2>{item.title.clone()}</h2>
            {item.subtitle.map(|s| view! { <p class="detail-subtitle">{s}</p> })}
            {item.rating.map(|r| view! {
                <p class="detail-rating">
                    <span class="stars">{stars(r)}</span>
                    {crate::rating::describe(r).map(|d| view! { <span class="rating-description">{d}</span> })}
                </p>
            })}
            {item.category.map(|c| view! { <span class="badge">{c}</span> })}
            {schedule.date.as_deref().map(long_date).map(|d| view! { <p class="detail-date">{d}</p> })}
            {hours.map(|h| view! { <p class="detail-time">{h}</p> })}
            {item.price.map(|p| view! { <p class="detail-price">{rupiah(p)}</p> })}
            {item.capacity.map(|c| view! { <p class="detail-capacity">{format!("Capacity: {}", c)}</p> })}
            {item.body.map(|b| view! { <p class="detail-body">{b}</p> })}
            {item.created_at.as_deref().map(long_date).map(|d| view! { <p class="detail-created">{d}</p> })}
        </div>
    }
}
