//! Form Field Component
//!
//! Labeled input bound to one field of a typed form record, with the
//! field's validation error underneath.

use leptos::prelude::*;

use got_blood_core::forms::FormErrors;

#[component]
pub fn FormField(
    label: &'static str,
    /// Field name as reported by `FormErrors`
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    errors: ReadSignal<FormErrors>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.for_field(name).map(str::to_string));

    view! {
        <label class="form-field" class:invalid=move || error().is_some()>
            <span class="form-label">{label}</span>
            <input
                type=input_type
                name=name
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error().map(|text| view! { <span class="field-error">{text}</span> })}
        </label>
    }
}

/// `FormField` wired to one field of a form record held in a signal
pub fn bound_field<F>(
    form: RwSignal<F>,
    errors: ReadSignal<FormErrors>,
    label: &'static str,
    name: &'static str,
    input_type: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    view! {
        <FormField
            label=label
            name=name
            input_type=input_type
            value=Signal::derive(move || form.with(get))
            on_input=Callback::new(move |v: String| form.update(|f| set(f, v)))
            errors=errors
        />
    }
}
