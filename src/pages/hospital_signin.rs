//! Hospital Sign-in Page
//!
//! Sign-in form while logged out; blood management panel while logged in.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use got_blood_core::forms::{BloodAction, BloodUpdateForm, FormErrors, FormRecord, SignInForm};
use got_blood_core::RequestGuard;

use crate::components::{bound_field, FormField, FormMessage, Notice};
use crate::context::{use_app, use_session, Session};

const LOGIN_REQUIRED: &str = "You need to log in to modify blood inventory.";

#[component]
pub fn HospitalSignInPage() -> impl IntoView {
    let app = use_app();
    let session = use_session();
    let navigate = use_navigate();
    let form = RwSignal::new(SignInForm::default());
    let (errors, set_errors) = signal(FormErrors::default());
    let (notice, set_notice) = signal(Notice::None);
    let (submitting, set_submitting) = signal(false);
    let guard = RequestGuard::new();

    let on_submit = {
        let guard = guard.clone();
        let app = app.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            set_notice.set(Notice::None);
            let request = match form.with_untracked(|f| f.to_payload()) {
                Ok(request) => request,
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
                let result = api.login(&request).await;
                if !ticket.is_current() {
                    return;
                }
                set_submitting.set(false);
                let response = match result {
                    Ok(response) => response,
                    Err(e) => {
                        log::warn!("[SignIn] {}", e);
                        set_notice.set(Notice::Error(e));
                        return;
                    }
                };
                let message = response.message.clone();
                match (response.success, response.token) {
                    (true, Some(token)) => {
                        session.login(Session {
                            token,
                            hospital_name: request.hospital_name.clone(),
                            state: request.state.clone(),
                        });
                        set_notice.set(Notice::Success(message.unwrap_or_else(|| "Login successful.".to_string())));
                        TimeoutFuture::new(delay).await;
                        if ticket.is_current() {
                            navigate("/dashboard", Default::default());
                        }
                    }
                    (true, None) => {
                        log::error!("[SignIn] Login succeeded without a token");
                        set_notice.set(Notice::Error("Login failed. Please try again.".to_string()));
                    }
                    (false, _) => set_notice.set(Notice::Error(
                        message.unwrap_or_else(|| "Login failed. Please try again.".to_string()),
                    )),
                }
            });
        }
    };
    on_cleanup(move || guard.invalidate());

    view! {
        <div class="form-container">
            <Show
                when=move || session.is_logged_in()
                fallback=move || {
                    let on_submit = on_submit.clone();
                    view! {
                        <h2>"Sign In"</h2>
                        <form on:submit=on_submit novalidate=true>
                            {bound_field(form, errors, "Email", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                            {bound_field(form, errors, "Password", "password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                            {bound_field(form, errors, "State", "state", "text", |f| f.state.clone(), |f, v| f.state = v)}
                            {bound_field(form, errors, "Hospital Name", "hospital_name", "text", |f| f.hospital_name.clone(), |f, v| f.hospital_name = v)}
                            <button type="submit" class="btn-primary" disabled=move || submitting.get()>"Sign In"</button>
                        </form>
                    }
                }
            >
                <BloodManagement set_notice=set_notice />
            </Show>
            <FormMessage notice=notice />
        </div>
    }
}

/// Add or subtract bags for the signed-in hospital
#[component]
fn BloodManagement(set_notice: WriteSignal<Notice>) -> impl IntoView {
    let app = use_app();
    let session = use_session();
    let form = RwSignal::new(BloodUpdateForm::default());
    let (errors, set_errors) = signal(FormErrors::default());
    let (pending, set_pending) = signal(false);
    let guard = RequestGuard::new();

    let change_blood = {
        let guard = guard.clone();
        move |action: BloodAction| {
            let Some(current) = session.session.get_untracked() else {
                set_notice.set(Notice::Error(LOGIN_REQUIRED.to_string()));
                return;
            };
            let payload = match form.with_untracked(|f| f.to_payload(&current.hospital_name, &current.state, action)) {
                Ok(payload) => payload,
                Err(e) => {
                    set_notice.set(Notice::Error(e.summary()));
                    set_errors.set(e);
                    return;
                }
            };
            set_errors.set(FormErrors::default());
            set_pending.set(true);
            let ticket = guard.ticket();
            let api = app.api.clone();
            spawn_local(async move {
                let result = api.update_blood(&payload).await;
                if !ticket.is_current() {
                    return;
                }
                if let Err(e) = &result {
                    log::warn!("[SignIn] Blood update failed: {}", e);
                }
                set_notice.set(result.into());
                set_pending.set(false);
            });
        }
    };
    on_cleanup(move || guard.invalidate());
    let add = change_blood.clone();
    let subtract = change_blood;

    let on_logout = move |_| {
        session.logout();
        set_notice.set(Notice::Success("You have been logged out.".to_string()));
    };

    view! {
        <div>
            <h3>"Welcome to the Dashboard!"</h3>
            <button type="button" on:click=on_logout>"Log Out"</button>

            <div class="blood-management">
                <h3>"Blood Management"</h3>
                <FormField
                    label="Blood Amount"
                    name="amount"
                    input_type="number"
                    value=Signal::derive(move || form.with(|f| f.amount.clone()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.amount = v))
                    errors=errors
                />
                <button type="button" disabled=move || pending.get() on:click=move |_| add(BloodAction::Add)>
                    "Add Blood"
                </button>
                <button type="button" disabled=move || pending.get() on:click=move |_| subtract(BloodAction::Subtract)>
                    "Subtract Blood"
                </button>
            </div>
        </div>
    }
}
