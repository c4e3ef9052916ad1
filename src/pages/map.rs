use leptos::prelude::*;

use crate::components::HospitalMap;

#[component]
pub fn MapPage() -> impl IntoView {
    view! {
        <div class="page-container">
            <h1>"Interactive Blood Bank Map"</h1>
            <p class="subtitle">
                "Markers are colored by total stored volume. Dashed lines connect each hospital to nearby hospitals short on its most plentiful blood type."
            </p>
            <HospitalMap />
        </div>
    }
}
