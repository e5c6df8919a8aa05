//! Labelled text input bound to a string signal.

use leptos::prelude::*;

#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] multiline: bool,
    #[prop(optional)] required: bool,
    /// Inline message shown under the input, e.g. a server field error.
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let input = if multiline {
        view! {
            <textarea
                rows="3"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type=kind
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            {input}
            {move || {
                error
                    .and_then(|message| message.get())
                    .map(|message| view! { <span class="form-field__error">{message}</span> })
            }}
        </label>
    }
}
