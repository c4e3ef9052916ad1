use leptos::prelude::*;

use got_blood_core::forms::FormErrors;
use got_blood_core::BloodType;

/// Select over the eight blood types with an empty prompt option
#[component]
pub fn BloodTypeSelect(
    label: &'static str,
    name: &'static str,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    errors: ReadSignal<FormErrors>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.for_field(name).map(str::to_string));

    view! {
        <label class="form-field" class:invalid=move || error().is_some()>
            <span class="form-label">{label}</span>
            <select
                name=name
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"Select your blood type"</option>
                {BloodType::ALL
                    .iter()
                    .map(|bt| view! { <option value=bt.as_str()>{bt.as_str()}</option> })
                    .collect_view()}
            </select>
            {move || error().map(|text| view! { <span class="field-error">{text}</span> })}
        </label>
    }
}
