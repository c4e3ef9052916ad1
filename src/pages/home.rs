use leptos::prelude::*;

use crate::components::HospitalMap;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-container">
            <div class="header">
                <h4 class="app-title">"Got Blood? We Do. Let's Make Sure Everyone Does."</h4>
                <p class="subtitle"><i>"Track donations and shortages nationwide with our interactive map."</i></p>
            </div>
            <HospitalMap />
        </div>
    }
}
