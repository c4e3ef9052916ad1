//! Leaflet Bindings
//!
//! The subset of the global `L` object the hospital map drives. Leaflet
//! itself is loaded by `index.html`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn create_map(element: &web_sys::HtmlElement) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: u32) -> LeafletMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &LeafletMap, bounds: &JsValue, options: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method)]
    pub fn remove(this: &LeafletMap);

    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    pub fn circle_marker(latlng: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L)]
    pub fn polyline(latlngs: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, html: &str) -> Layer;

    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_group_to(this: &LayerGroup, map: &LeafletMap) -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LayerGroup, layer: &Layer) -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup) -> LayerGroup;
}

// ========================
// Option Objects
// ========================

#[derive(Serialize)]
pub struct TileOptions<'a> {
    pub attribution: &'a str,
    #[serde(rename = "maxZoom")]
    pub max_zoom: u32,
}

#[derive(Serialize)]
pub struct CircleOptions<'a> {
    pub radius: f64,
    pub color: &'a str,
    #[serde(rename = "fillColor")]
    pub fill_color: &'a str,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    pub weight: u32,
}

#[derive(Serialize)]
pub struct LineOptions<'a> {
    pub color: &'a str,
    pub weight: u32,
    #[serde(rename = "dashArray")]
    pub dash_array: &'a str,
}

#[derive(Serialize)]
pub struct FitOptions {
    pub padding: [u32; 2],
}

/// Serialize an option object or coordinate array for Leaflet
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        log::error!("[Map] Could not build Leaflet argument: {}", e);
        JsValue::UNDEFINED
    })
}
