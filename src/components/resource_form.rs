//! Resource Form Component
//!
//! Create/edit form rendered from the panel's field schema. Values and
//! errors live in the panel's form state, so a rejected submit keeps what
//! the user typed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::RatingInput;
use crate::forms::{schema, FieldKind, FieldSpec, FormMode};
use crate::panel::PanelController;

#[component]
fn FormField(panel: PanelController, spec: FieldSpec) -> impl IntoView {
    let form = panel.form();
    let name = spec.name;
    let value = move || form.with(|f| f.values.get(name).to_string());
    let on_input = move |ev: web_sys::Event| panel.set_field(name, event_target_value(&ev));

    let control = match spec.kind {
        FieldKind::Rating => {
            // Create and edit keep separate ratings; follow the form mode
            let editing = Memo::new(move |_| form.with(|f| matches!(f.mode, Some(FormMode::Edit(_)))));
            view! {
                {move || {
                    editing.track();
                    view! { <RatingInput rating=panel.rating() /> }
                }}
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea
                name=name
                rows="3"
                placeholder=spec.placeholder
                required=spec.required
                prop:value=value
                on:input=on_input
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select name=name required=spec.required prop:value=value on:change=on_input>
                {options
                    .iter()
                    .map(|(key, label)| view! { <option value=*key>{*label}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        _ => view! {
            <input
                type=spec.kind.input_type()
                name=name
                placeholder=spec.placeholder
                required=spec.required
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-field">
            <label for=name>{spec.label}</label>
            {control}
            {move || {
                form.with(|f| f.field_errors(name))
                    .into_iter()
                    .map(|msg| view! { <p class="field-error">{msg}</p> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
pub fn ResourceForm(panel: PanelController) -> impl IntoView {
    let form = panel.form();
    let busy = move || panel.state().with(|s| s.submitting);
    let loading = move || form.with(|f| f.loading);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move { panel.submit_form().await });
    };

    let fields = schema(panel.kind())
        .iter()
        .map(|spec| view! { <FormField panel=panel spec=*spec /> })
        .collect_view();

    view! {
        <form class="resource-form" on:submit=on_submit>
            {move || form.with(|f| f.errors.message.clone()).map(|msg| view! { <p class="form-error">{msg}</p> })}
            <Show when=loading>
                <p class="form-loading"><span class="spinner"></span>" Loading..."</p>
            </Show>
            {fields}
            <div class="form-actions">
                <button type="button" class="cancel-btn" disabled=busy on:click=move |_| panel.request_close()>
                    "Cancel"
                </button>
                <button type="submit" class="submit-btn" disabled=move || busy() || loading()>
                    <Show when=busy fallback=|| "Save">
                        <span class="spinner"></span>
                        " Saving..."
                    </Show>
                </button>
            </div>
        </form>
    }
}
