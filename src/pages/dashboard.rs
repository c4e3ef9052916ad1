//! Hospital Dashboard Page
//!
//! One hospital's inventory plus the panels its stock level calls for.
//! The hospital comes from `?lid=`, falling back to the configured default.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

use got_blood_core::dashboard::{DashboardData, DashboardMode};
use got_blood_core::dto::HospitalInventorySnapshot;
use got_blood_core::{Loadable, RequestGuard};

use crate::context::use_app;

type DashboardState = Loadable<Option<(DashboardMode, DashboardData)>>;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app();
    let query = use_query_map();
    let default_lid = app.config.default_hospital_lid.clone();
    let lid = Memo::new(move |_| query.with(|q| q.get("lid")).unwrap_or_else(|| default_lid.clone()));

    let (state, set_state) = signal(DashboardState::pending());
    let guard = RequestGuard::new();

    {
        let guard = guard.clone();
        let api = app.api.clone();
        let thresholds = app.config.thresholds;
        Effect::new(move |_| {
            let lid = lid.get();
            // a newer hospital id supersedes any load still in flight
            let ticket = guard.reissue();
            let api = api.clone();
            set_state.update(|s| s.begin());
            spawn_local(async move {
                log::debug!("[Dashboard] Loading {}", lid);
                let result = api.load_dashboard(&lid, thresholds).await.map(Some);
                if !ticket.is_current() {
                    return;
                }
                if let Err(e) = &result {
                    log::error!("[Dashboard] {}: {}", lid, e);
                }
                set_state.update(|s| s.settle(result));
            });
        });
    }
    on_cleanup(move || guard.invalidate());

    move || {
        let current = state.get();
        if current.loading {
            return view! {
                <div class="text-center">
                    <div class="spinner" role="status"></div>
                    <p>"Loading Hospital Dashboard..."</p>
                </div>
            }
            .into_any();
        }
        if let Some(error) = current.error {
            return view! { <div class="alert error" role="alert">"Error: " {error}</div> }.into_any();
        }
        match current.data {
            Some((mode, mut data)) => match data.snapshot.take() {
                Some(snapshot) => dashboard_view(mode, snapshot, data).into_any(),
                None => no_data().into_any(),
            },
            None => no_data().into_any(),
        }
    }
}

fn no_data() -> impl IntoView {
    view! { <div class="alert warning">"No hospital data available."</div> }
}

fn dashboard_view(mode: DashboardMode, snapshot: HospitalInventorySnapshot, panels: DashboardData) -> impl IntoView {
    let DashboardData { excess_hospitals, donor_pools, needed_hospitals, recommendations, .. } = panels;

    let mode_note = match &mode {
        DashboardMode::Shortage { blood_type } => format!("Low on {}: showing where to find more.", blood_type),
        DashboardMode::Surplus { blood_type } => format!("Surplus of {}: showing hospitals in need.", blood_type),
        DashboardMode::Neutral => "Stock levels are within normal range.".to_string(),
    };

    let inventory = snapshot
        .inventory
        .iter()
        .map(|(blood_type, count)| view! { <li class="list-item">{format!("{}: {} bags", blood_type, count)}</li> })
        .collect_view();

    let donor_stats = (!snapshot.donor_stats.is_empty()).then(|| {
        let items = snapshot
            .donor_stats
            .iter()
            .map(|stat| {
                let by_type = stat
                    .blood_type_stats
                    .iter()
                    .map(|b| view! { <div>{format!(" - {}: {} donors", b.blood_type, b.donor_count)}</div> })
                    .collect_view();
                view! { <li>{format!("{}: {} total donors", stat.city, stat.total_donors)} {by_type}</li> }
            })
            .collect_view();
        view! {
            <li class="list-item">
                <details>
                    <summary>"Donor Statistics Summary"</summary>
                    <ul>{items}</ul>
                </details>
            </li>
        }
    });

    let excess = excess_hospitals.filter(|h| !h.is_empty()).map(|hospitals| {
        panel(
            "Nearby Hospitals with Excess Blood (of Needed Type)",
            hospitals
                .into_iter()
                .map(|h| format!("{}, {} - Excess bags: {}", h.hospital_name, h.hospital_location, h.excess_blood_count))
                .collect(),
        )
    });

    let pools = donor_pools.filter(|p| !p.is_empty()).map(|pools| {
        panel(
            "Nearby Areas with Potential Donors (of Needed Type)",
            pools
                .into_iter()
                .map(|p| format!("{} - Potential Donors: {}", p.area_name, p.donor_count))
                .collect(),
        )
    });

    let needed = needed_hospitals.filter(|h| !h.is_empty()).map(|hospitals| {
        panel(
            "Nearest Hospitals in Need (of Surplus Blood Type)",
            hospitals
                .into_iter()
                .map(|h| format!("{}, {} - Shortage Bags: {}", h.hospital_name, h.hospital_location, h.shortage_blood_count))
                .collect(),
        )
    });

    let recommendations = recommendations.map(|r| {
        if r.recommendations.is_empty() {
            view! {
                <div class="alert info">
                    "No specific blood donation recommendations at this time based on available data."
                </div>
            }
            .into_any()
        } else {
            panel("Donation Recommendations", r.recommendations).into_any()
        }
    });

    view! {
        <div class="page-container">
            <h1>"Hospital Blood Dashboard: " {snapshot.hospital_name.clone()}</h1>
            <p>"Location: " {snapshot.hospital_location.clone()}</p>
            <p class="mode-note">{mode_note}</p>

            <div class="card">
                <div class="card-header">"Current Blood Inventory"</div>
                <ul class="list-group">
                    {inventory}
                    {donor_stats}
                </ul>
            </div>

            {excess}
            {pools}
            {needed}
            {recommendations}
        </div>
    }
}

fn panel(title: &'static str, lines: Vec<String>) -> impl IntoView {
    view! {
        <div class="card">
            <div class="card-header">{title}</div>
            <ul class="list-group">
                {lines.into_iter().map(|line| view! { <li class="list-item">{line}</li> }).collect_view()}
            </ul>
        </div>
    }
}
