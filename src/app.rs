//! Got Blood? Frontend App
//!
//! Router shell: navigation bar on top, routed page below.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use got_blood_core::ClientConfig;

use crate::components::NavBar;
use crate::context::{AppContext, SessionContext};
use crate::pages::{
    DashboardPage, DonorAddPage, HomePage, HospitalSignInPage, HospitalSignupPage, MapPage,
    NotFoundPage, QueryPage, SignUpPage, StatisticsPage,
};

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("[App] Invalid build configuration, using defaults: {}", e);
        ClientConfig::default()
    });
    log::info!("[App] API base: {}", config.api_base);

    provide_context(AppContext::new(config));
    provide_context(SessionContext::new());

    view! {
        <Router>
            <NavBar />
            <main class="app-main">
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/signup") view=SignUpPage />
                    <Route path=path!("/hsign") view=HospitalSignupPage />
                    <Route path=path!("/hlogin") view=HospitalSignInPage />
                    <Route path=path!("/dsign") view=DonorAddPage />
                    <Route path=path!("/filter") view=QueryPage />
                    <Route path=path!("/map") view=MapPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/statistics") view=StatisticsPage />
                </Routes>
            </main>
        </Router>
    }
}
