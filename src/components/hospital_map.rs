//! Hospital Map Component
//!
//! Leaflet map of hospital stock levels. Fetches locations once per mount,
//! then one match query per hospital, and keeps the marker layer, the
//! viewport and the match overlay in step with the store.

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use got_blood_core::map::{derive_markers, match_lines, BoundingBox, HospitalKey, MatchLine, Marker};
use got_blood_core::RequestGuard;

use crate::components::SeverityLegend;
use crate::context::use_app;
use crate::leaflet::{self, to_js, CircleOptions, FitOptions, LayerGroup, LeafletMap, LineOptions, TileOptions};
use crate::store::{store_set_matches, MapState, MapStateStoreFields, MapStore};

const DEFAULT_CENTER: [f64; 2] = [37.7749, -122.4194];
const DEFAULT_ZOOM: u32 = 5;
const ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Leaflet objects owned by one mounted map
struct MapLayers {
    map: LeafletMap,
    markers: LayerGroup,
    lines: LayerGroup,
}

#[component]
pub fn HospitalMap() -> impl IntoView {
    let app = use_app();
    let store: MapStore = Store::new(MapState::new());
    let guard = RequestGuard::new();

    // Load locations, then matches per hospital
    {
        let guard = guard.clone();
        let api = app.api.clone();
        let max_results = app.config.max_match_results;
        Effect::new(move |_| {
            let ticket = guard.ticket();
            let api = api.clone();
            spawn_local(async move {
                let result = api.list_hospital_locations().await;
                if !ticket.is_current() {
                    log::debug!("[Map] Discarding locations for an unmounted map");
                    return;
                }
                let entries = result.as_ref().map(|e| e.clone()).unwrap_or_default();
                if let Ok(ref loaded) = result {
                    log::info!("[Map] Loaded {} hospital locations", loaded.len());
                }
                store.locations().write().settle(result);

                for entry in entries
                    .into_iter()
                    .filter(|e| !e.coordinates.is_unknown() && !e.blood_data.is_empty())
                {
                    let api = api.clone();
                    let ticket = ticket.clone();
                    spawn_local(async move {
                        let key = HospitalKey::of(&entry);
                        let matches = api.list_matches(&entry, max_results).await.unwrap_or_else(|e| {
                            log::warn!("[Map] Matches for {} unavailable: {}", key.hospital, e);
                            Vec::new()
                        });
                        if ticket.is_current() {
                            store_set_matches(&store, key, matches);
                        }
                    });
                }
            });
        });
    }
    on_cleanup(move || guard.invalidate());

    let markers = Memo::new(move |_| store.locations().with(|l| derive_markers(&l.data)));
    let lines = Memo::new(move |_| {
        let markers = markers.get();
        store.matches().with(|matches| match_lines(&markers, matches))
    });

    // Leaflet setup once the container exists
    let container = NodeRef::<Div>::new();
    let layers = StoredValue::new_local(None::<MapLayers>);
    let (map_ready, set_map_ready) = signal(false);
    let tile_url = app.config.tile_url.clone();
    let padding = app.config.map_padding_px;

    Effect::new(move |_| {
        let Some(element) = container.get() else { return };
        if layers.with_value(Option::is_some) {
            return;
        }
        let map = leaflet::create_map(&element);
        map.set_view(&to_js(&DEFAULT_CENTER), DEFAULT_ZOOM);
        leaflet::tile_layer(&tile_url, &to_js(&TileOptions { attribution: ATTRIBUTION, max_zoom: 19 })).add_to(&map);
        let markers = leaflet::layer_group();
        markers.add_group_to(&map);
        let lines = leaflet::layer_group();
        lines.add_group_to(&map);
        layers.set_value(Some(MapLayers { map, markers, lines }));
        set_map_ready.set(true);
    });

    Effect::new(move |_| {
        let markers = markers.get();
        if !map_ready.get() {
            return;
        }
        layers.with_value(|layers| {
            if let Some(layers) = layers {
                draw_markers(layers, &markers, padding);
            }
        });
    });

    Effect::new(move |_| {
        let lines = lines.get();
        if !map_ready.get() {
            return;
        }
        layers.with_value(|layers| {
            if let Some(layers) = layers {
                draw_lines(layers, &lines);
            }
        });
    });

    on_cleanup(move || {
        layers.try_with_value(|layers| {
            if let Some(layers) = layers {
                layers.map.remove();
            }
        });
    });

    let error = move || store.locations().with(|l| l.error.clone());
    let loading = move || store.locations().with(|l| l.loading);

    view! {
        <div class="map-wrapper">
            <Show when=loading>
                <div class="loading">"Loading hospital locations..."</div>
            </Show>
            {move || error().map(|text| view! { <div class="alert error" role="alert">{text}</div> })}
            <div class="map" node_ref=container></div>
            <p class="map-summary">
                {move || format!("{} hospitals on the map, {} transfer routes", markers.get().len(), lines.get().len())}
            </p>
            <SeverityLegend />
        </div>
    }
}

fn draw_markers(layers: &MapLayers, markers: &[Marker], padding: u32) {
    layers.markers.clear_layers();
    for marker in markers {
        let color = marker.band.color();
        let layer = leaflet::circle_marker(
            &to_js(&[marker.position.lat, marker.position.lon]),
            &to_js(&CircleOptions { radius: 9.0, color, fill_color: color, fill_opacity: 0.8, weight: 1 }),
        );
        layer.bind_popup(&marker.popup_html());
        layers.markers.add_layer(&layer);
    }
    if let Some(bounds) = BoundingBox::of_markers(markers) {
        layers
            .map
            .fit_bounds(&to_js(&bounds.corners()), &to_js(&FitOptions { padding: [padding, padding] }));
    }
}

fn draw_lines(layers: &MapLayers, lines: &[MatchLine]) {
    layers.lines.clear_layers();
    for line in lines {
        let layer = leaflet::polyline(
            &to_js(&[[line.from.lat, line.from.lon], [line.to.lat, line.to.lon]]),
            &to_js(&LineOptions { color: "#932d2d", weight: 2, dash_array: "6 4" }),
        );
        layer.bind_popup(&line.popup_html());
        layers.lines.add_layer(&layer);
    }
}
