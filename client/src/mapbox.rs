use futures::channel::oneshot;
use ocmap_shared::{config::MapConfig, directions::Geolocator, LngLat, MarkerHandle};
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::{Element, GeolocationPosition, HtmlElement};

#[wasm_bindgen(module = "/mapbox.js")]
extern "C" {
    type JsMap;

    fn create_map(container: &str, token: &str, style: &str, lng: f64, lat: f64, zoom: f64)
        -> JsMap;
    fn add_controls(map: &JsMap) -> JsGeolocate;
    fn once_loaded(map: &JsMap, callback: JsValue);
    fn add_geojson_source(map: &JsMap, id: &str, data: &str);
    fn add_layer(map: &JsMap, layer: &str);

    type JsMarker;

    fn add_marker(map: &JsMap, element: &HtmlElement, lng: f64, lat: f64, content: &Element)
        -> JsMarker;

    type JsGeolocate;

    fn geolocate_once(control: &JsGeolocate, callback: JsValue);
    fn geolocate_trigger(control: &JsGeolocate) -> bool;
}

const BOUNDARY_SOURCE: &str = "orange-county-border";

pub struct Map(JsMap);

impl Map {
    /// Creates the map in `container` and attaches navigation, geocoder and
    /// geolocation controls.
    pub fn new(container: &str, config: &MapConfig) -> (Self, Geolocate) {
        let map = create_map(
            container,
            &config.access_token,
            &config.style,
            config.center.lng,
            config.center.lat,
            config.zoom,
        );
        let geolocate = add_controls(&map);
        (Self(map), Geolocate(geolocate))
    }

    pub async fn loaded(&self) {
        let (send, receive) = oneshot::channel::<()>();
        once_loaded(
            &self.0,
            Closure::once_into_js(move || {
                let _ = send.send(());
            }),
        );
        let _ = receive.await;
    }

    pub fn add_boundary(&self, data: &str) {
        add_geojson_source(&self.0, BOUNDARY_SOURCE, data);
        let outline = json!({
            "id": "orange-county-border-layer",
            "type": "line",
            "source": BOUNDARY_SOURCE,
            "paint": { "line-color": "#808080", "line-width": 2 },
        });
        let fill = json!({
            "id": "orange-county-border-fill",
            "type": "fill",
            "source": BOUNDARY_SOURCE,
            "paint": { "fill-color": "#FF0000", "fill-opacity": 0.05 },
        });
        add_layer(&self.0, &outline.to_string());
        add_layer(&self.0, &fill.to_string());
    }

    pub fn add_marker(&self, element: HtmlElement, at: LngLat, popup: &Element) -> Marker {
        let inner = add_marker(&self.0, &element, at.lng, at.lat, popup);
        Marker {
            _inner: inner,
            element,
        }
    }
}

/// A placed marker. Markers stay on the map for the whole session, so
/// dropping the handle does not remove it.
pub struct Marker {
    _inner: JsMarker,
    element: HtmlElement,
}

impl Marker {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl MarkerHandle for Marker {
    fn set_visible(&self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        if let Err(err) = self.element().style().set_property("display", display) {
            log::warn!("could not set marker display: {err:?}");
        }
    }
}

pub struct Geolocate(JsGeolocate);

impl Geolocator for Geolocate {
    // no timeout: if the user never grants access, `f` never runs
    fn once_located(&self, f: impl FnOnce(LngLat) + 'static) {
        geolocate_once(
            &self.0,
            Closure::once_into_js(move |event: JsValue| {
                let coords = event.unchecked_into::<GeolocationPosition>().coords();
                f(LngLat::new(coords.longitude(), coords.latitude()))
            }),
        );
    }

    fn trigger(&self) -> bool {
        geolocate_trigger(&self.0)
    }
}
