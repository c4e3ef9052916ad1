//! Donation Alerts Sign-up Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use got_blood_core::forms::{DonorSignupForm, FormErrors, FormRecord};
use got_blood_core::RequestGuard;

use crate::components::{BloodTypeSelect, FormField, FormMessage, Notice};
use crate::context::use_app;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let app = use_app();
    let form = RwSignal::new(DonorSignupForm::default());
    let (errors, set_errors) = signal(FormErrors::default());
    let (notice, set_notice) = signal(Notice::None);
    let (submitting, set_submitting) = signal(false);
    let guard = RequestGuard::new();

    let on_submit = {
        let guard = guard.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            set_notice.set(Notice::None);
            let payload = match form.with_untracked(|f| f.to_payload()) {
                Ok(payload) => payload,
                Err(e) => {
                    set_notice.set(Notice::Error(e.summary()));
                    set_errors.set(e);
                    return;
                }
            };
            set_errors.set(FormErrors::default());
            set_submitting.set(true);
            let ticket = guard.ticket();
            let api = app.api.clone();
            spawn_local(async move {
                let result = api.donor_signup(&payload).await;
                if !ticket.is_current() {
                    return;
                }
                match &result {
                    Ok(_) => log::info!("[SignUp] Registered {} for {} alerts", payload.email, payload.blood_type),
                    Err(e) => log::error!("[SignUp] {}", e),
                }
                set_notice.set(
                    result
                        .map(|_| "You are successfully signed up for blood donation notifications!".to_string())
                        .into(),
                );
                set_submitting.set(false);
            });
        }
    };
    on_cleanup(move || guard.invalidate());

    view! {
        <div class="form-container">
            <h2>"Sign Up for Blood Donation Notifications"</h2>
            <form on:submit=on_submit novalidate=true>
                <FormField
                    label="Email:"
                    name="email"
                    input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.email = v))
                    errors=errors
                />
                <BloodTypeSelect
                    label="Blood Type:"
                    name="blood_type"
                    value=Signal::derive(move || form.with(|f| f.blood_type.clone()))
                    on_change=Callback::new(move |v: String| form.update(|f| f.blood_type = v))
                    errors=errors
                />
                <FormField
                    label="Location:"
                    name="location"
                    value=Signal::derive(move || form.with(|f| f.location.clone()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.location = v))
                    errors=errors
                />
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing up..." } else { "Sign Up" }}
                </button>
            </form>
            <FormMessage notice=notice />
        </div>
    }
}
