use leptos::prelude::*;

use got_blood_core::map::SeverityBand;

#[component]
pub fn SeverityLegend() -> impl IntoView {
    view! {
        <div class="map-legend">
            <h3>"Map Legend"</h3>
            <ul>
                {SeverityBand::ALL
                    .iter()
                    .map(|band| {
                        view! {
                            <li>
                                <span class="legend-swatch" style=format!("background-color: {}", band.color())></span>
                                <span class="legend-label">{band.label()}</span>
                                <span class="legend-range">{band.range_label()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
