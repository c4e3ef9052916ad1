//! Donor Registration Page
//!
//! Full donor record entry for hospital staff.

use leptos::prelude::*;
use leptos::task::spawn_local;

use got_blood_core::forms::{DonorForm, FormErrors, FormRecord};
use got_blood_core::RequestGuard;

use crate::components::{bound_field, BloodTypeSelect, FormMessage, Notice};
use crate::context::use_app;

#[component]
pub fn DonorAddPage() -> impl IntoView {
    let app = use_app();
    let form = RwSignal::new(DonorForm::default());
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
                let result = api.add_donor(&payload).await;
                if !ticket.is_current() {
                    return;
                }
                set_submitting.set(false);
                match &result {
                    Ok(_) => {
                        log::info!("[DonorAdd] Added donor {}", payload.donor_id);
                        form.set(DonorForm::default());
                    }
                    Err(e) => log::warn!("[DonorAdd] {}", e),
                }
                set_notice.set(result.into());
            });
        }
    };
    on_cleanup(move || guard.invalidate());

    view! {
        <div class="form-container">
            <h2>"Add Donor"</h2>
            <form on:submit=on_submit novalidate=true>
                {bound_field(form, errors, "Donor ID", "donor_id", "text", |f| f.donor_id.clone(), |f, v| f.donor_id = v)}
                {bound_field(form, errors, "First Name", "first_name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                {bound_field(form, errors, "Last Name", "last_name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                {bound_field(form, errors, "Age", "age", "number", |f| f.age.clone(), |f, v| f.age = v)}
                <BloodTypeSelect
                    label="Blood Type"
                    name="blood_type"
                    value=Signal::derive(move || form.with(|f| f.blood_type.clone()))
                    on_change=Callback::new(move |v: String| form.update(|f| f.blood_type = v))
                    errors=errors
                />
                {bound_field(form, errors, "City", "city", "text", |f| f.city.clone(), |f, v| f.city = v)}
                {bound_field(form, errors, "State", "state", "text", |f| f.state.clone(), |f, v| f.state = v)}
                {bound_field(form, errors, "Latitude", "lat", "number", |f| f.lat.clone(), |f, v| f.lat = v)}
                {bound_field(form, errors, "Longitude", "lon", "number", |f| f.lon.clone(), |f, v| f.lon = v)}
                {bound_field(form, errors, "Email", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {bound_field(form, errors, "Phone", "phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>"Add Donor"</button>
            </form>
            <FormMessage notice=notice />
        </div>
    }
}
