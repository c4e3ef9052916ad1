//! Hospital Sign-up Page
//!
//! Geocodes the zip code, creates the account, then sends the user to the
//! sign-in page.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use got_blood_core::forms::{FormErrors, FormRecord, HospitalSignupForm};
use got_blood_core::RequestGuard;

use crate::components::{bound_field, FormMessage, Notice};
use crate::context::use_app;

#[component]
pub fn HospitalSignupPage() -> impl IntoView {
    let app = use_app();
    let navigate = use_navigate();
    let form = RwSignal::new(HospitalSignupForm::default());
    let (errors, set_errors) = signal(FormErrors::default());
    let (notice, set_notice) = signal(Notice::None);
    let (submitting, set_submitting) = signal(false);
    let guard = RequestGuard::new();

    let on_submit = {
        let guard = guard.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            set_notice.set(Notice::None);
            let signup = match form.with_untracked(|f| f.to_payload()) {
                Ok(signup) => signup,
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
            let delay = app.config.redirect_delay_ms;
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = api.hospital_signup(signup).await;
                if !ticket.is_current() {
                    return;
                }
                set_submitting.set(false);
                let succeeded = result.is_ok();
                if let Err(e) = &result {
                    log::warn!("[HospitalSignup] {}", e);
                }
                set_notice.set(result.into());
                if succeeded {
                    TimeoutFuture::new(delay).await;
                    if ticket.is_current() {
                        navigate("/hlogin", Default::default());
                    }
                }
            });
        }
    };
    on_cleanup(move || guard.invalidate());

    view! {
        <div class="form-container">
            <h2>"Hospital Signup"</h2>
            <form on:submit=on_submit novalidate=true>
                {bound_field(form, errors, "Hospital Name", "name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {bound_field(form, errors, "City", "city", "text", |f| f.city.clone(), |f, v| f.city = v)}
                {bound_field(form, errors, "Email", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {bound_field(form, errors, "Zip Code", "zip_code", "text", |f| f.zip_code.clone(), |f, v| f.zip_code = v)}
                {bound_field(form, errors, "Password", "password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>"Signup"</button>
            </form>
            <FormMessage notice=notice />
        </div>
    }
}
