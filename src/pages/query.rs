//! Hospital Data Page
//!
//! Inventory table with a live hospital-name filter.

use leptos::prelude::*;
use leptos::task::spawn_local;

use got_blood_core::dto::HospitalInventoryRecord;
use got_blood_core::filter::{no_match_message, table_rows};
use got_blood_core::{Loadable, RequestGuard};

use crate::context::use_app;

#[component]
pub fn QueryPage() -> impl IntoView {
    let app = use_app();
    let (records, set_records) = signal(Loadable::<Vec<HospitalInventoryRecord>>::pending());
    let (query, set_query) = signal(String::new());
    let guard = RequestGuard::new();

    {
        let guard = guard.clone();
        let api = app.api.clone();
        Effect::new(move |_| {
            let ticket = guard.ticket();
            let api = api.clone();
            spawn_local(async move {
                let result = api.list_inventory_records().await;
                if !ticket.is_current() {
                    return;
                }
                match &result {
                    Ok(loaded) => log::info!("[Query] Loaded {} records", loaded.len()),
                    Err(e) => log::error!("[Query] {}", e),
                }
                set_records.update(|state| state.settle(result));
            });
        });
    }
    on_cleanup(move || guard.invalidate());

    let visible = move || {
        let needle = query.get();
        records.with(|state| {
            table_rows(state, &needle).map(|rows| rows.into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="page-container">
            <h2>"Hospital Data"</h2>

            <input
                type="text"
                class="search-input"
                placeholder="Search by Hospital Name..."
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />

            <Show when=move || records.with(|s| s.loading)>
                <div class="loading">"Loading hospital data..."</div>
            </Show>
            {move || records.with(|s| s.error.clone()).map(|text| view! { <div class="alert error" role="alert">{text}</div> })}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Hospital"</th>
                        <th>"City"</th>
                        <th>"Blood Type"</th>
                        <th>"Delta Count"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let Some(rows) = visible() else {
                            return ().into_any();
                        };
                        if rows.is_empty() {
                            view! {
                                <tr>
                                    <td colspan="4" class="text-center">{no_match_message(&query.get())}</td>
                                </tr>
                            }
                            .into_any()
                        } else {
                            rows.into_iter()
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td>{row.hospital}</td>
                                            <td>{row.city}</td>
                                            <td>{row.blood_type}</td>
                                            <td>{row.delta_count}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}
