//! Statistics Page
//!
//! Aggregate figures over the inventory records.

use leptos::prelude::*;
use leptos::task::spawn_local;

use got_blood_core::dto::HospitalInventoryRecord;
use got_blood_core::stats::InventoryStats;
use got_blood_core::{Loadable, RequestGuard};

use crate::context::use_app;

#[component]
pub fn StatisticsPage() -> impl IntoView {
    let app = use_app();
    let (records, set_records) = signal(Loadable::<Vec<HospitalInventoryRecord>>::pending());
    let guard = RequestGuard::new();

    {
        let guard = guard.clone();
        let api = app.api.clone();
        Effect::new(move |_| {
            let ticket = guard.ticket();
            let api = api.clone();
            spawn_local(async move {
                let result = api.list_inventory_records().await;
                if ticket.is_current() {
                    set_records.update(|state| state.settle(result));
                }
            });
        });
    }
    on_cleanup(move || guard.invalidate());

    let stats = Memo::new(move |_| records.with(|s| InventoryStats::from_records(&s.data)));

    view! {
        <div class="page-container">
            <h1>"Blood Management Statistics"</h1>

            <Show when=move || records.with(|s| s.loading)>
                <div class="loading">"Loading statistics..."</div>
            </Show>
            {move || records.with(|s| s.error.clone()).map(|text| view! { <div class="alert error" role="alert">{text}</div> })}

            <Show when=move || records.with(|s| s.is_ready())>
                <div class="metric-grid">
                    <div class="card metric">
                        <h3>"Blood Units Available"</h3>
                        <div class="metric-value">{move || stats.with(|s| s.total_units)}</div>
                    </div>
                    <div class="card metric">
                        <h3>"Hospitals Reporting"</h3>
                        <div class="metric-value">{move || stats.with(|s| s.hospital_count)}</div>
                    </div>
                    <div class="card metric">
                        <h3>"Inventory Records"</h3>
                        <div class="metric-value">{move || stats.with(|s| s.record_count)}</div>
                    </div>
                </div>

                <div class="card">
                    <h3>"By Blood Type"</h3>
                    <table class="data-table">
                        <thead>
                            <tr><th>"Blood Type"</th><th>"Units"</th><th>"Share"</th></tr>
                        </thead>
                        <tbody>
                            {move || stats.with(|s| s.by_blood_type.clone()).into_iter().map(|share| view! {
                                <tr>
                                    <td>{share.blood_type}</td>
                                    <td>{share.units}</td>
                                    <td>
                                        <div class="share-bar" style=format!("width: {:.1}%", share.percent)></div>
                                        {format!("{:.1}%", share.percent)}
                                    </td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>

                <div class="card">
                    <h3>"By City"</h3>
                    <table class="data-table">
                        <thead>
                            <tr><th>"City"</th><th>"Units"</th></tr>
                        </thead>
                        <tbody>
                            {move || stats.with(|s| s.by_city.clone()).into_iter().map(|(city, units)| view! {
                                <tr><td>{city}</td><td>{units}</td></tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
