use std::cell::RefCell;

use gloo::{events::EventListener, utils::document};
use maud::Markup;
use ocmap_shared::{
    config::MapConfig,
    location,
    marker::{facility_marker_html, narcan_marker_html},
    popup::{facility_popup_html, narcan_popup_html, DIRECTIONS_ACTION, OUT_OF_STOCK_ACTION},
    Facility, LngLat, MarkerRegistry, NarcanKind, NarcanSite,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::{
    actions::Actions,
    loader::{fetch_collection, LoadError},
    mapbox::{Map, Marker},
};

/// Owns the map and one marker registry per dataset.
pub struct MapView {
    map: Map,
    actions: Actions,
    facilities: RefCell<MarkerRegistry<Marker>>,
    narcan: RefCell<MarkerRegistry<Marker>>,
}

// marker element and popup content, built before anything touches the map
struct MarkerParts {
    element: HtmlElement,
    popup: Element,
    at: LngLat,
}

impl MapView {
    pub fn new(container: &str, config: &MapConfig) -> Self {
        let (map, geolocate) = Map::new(container, config);
        Self {
            map,
            actions: Actions::new(geolocate),
            facilities: Default::default(),
            narcan: Default::default(),
        }
    }

    /// Waits for the map style, then adds the boundary and every configured
    /// dataset. Load failures are reported to the user and leave that
    /// dataset without markers.
    pub async fn load(&self, config: &MapConfig) {
        self.map.loaded().await;
        self.map.add_boundary(&config.boundary);

        if let Err(err) = self.load_facilities(&config.locations).await {
            err.report();
        }
        if let Some(narcan) = &config.narcan {
            if let Err(err) = self.load_narcan(narcan).await {
                err.report();
            }
        }
    }

    /// Only the facility markers follow the checkbox; Narcan markers stay visible.
    pub fn show_facilities(&self, visible: bool) {
        self.facilities.borrow().apply_visibility(visible);
    }

    async fn load_facilities(&self, url: &str) -> Result<(), LoadError> {
        let collection = fetch_collection(url).await?;
        let parts = location::facilities(&collection)?
            .iter()
            .map(|facility| self.facility_parts(facility))
            .collect::<Result<Vec<_>, _>>()?;
        self.place(&self.facilities, parts);
        log::info!("{} facility markers", self.facilities.borrow().len());
        Ok(())
    }

    async fn load_narcan(&self, url: &str) -> Result<(), LoadError> {
        let collection = fetch_collection(url).await?;
        let parts = location::narcan_sites(&collection)?
            .iter()
            .map(|site| self.narcan_parts(site))
            .collect::<Result<Vec<_>, _>>()?;
        self.place(&self.narcan, parts);
        log::info!("{} narcan markers", self.narcan.borrow().len());
        Ok(())
    }

    fn place(&self, registry: &RefCell<MarkerRegistry<Marker>>, parts: Vec<MarkerParts>) {
        registry.borrow_mut().extend(
            parts
                .into_iter()
                .map(|MarkerParts { element, popup, at }| self.map.add_marker(element, at, &popup)),
        );
    }

    fn facility_parts(&self, facility: &Facility) -> Result<MarkerParts, JsValue> {
        let element = marker_element(facility_marker_html(&facility.kind))?;
        let style = element.style();
        style.set_property("width", "30px")?;
        style.set_property("height", "30px")?;
        style.set_property("cursor", "pointer")?;

        let popup = popup_element(facility_popup_html(facility))?;
        self.bind_directions(&popup, facility.position, &facility.address)?;
        Ok(MarkerParts {
            element,
            popup,
            at: facility.position,
        })
    }

    fn narcan_parts(&self, site: &NarcanSite) -> Result<MarkerParts, JsValue> {
        let element = marker_element(narcan_marker_html(site.kind))?;
        let popup = popup_element(narcan_popup_html(site))?;
        self.bind_directions(&popup, site.position, &site.address)?;
        if site.kind == NarcanKind::Distribution {
            let actions = self.actions.clone();
            let name = site.name.clone();
            on_action(&popup, OUT_OF_STOCK_ACTION, move || {
                actions.report_out_of_stock(&name)
            })?;
        }
        Ok(MarkerParts {
            element,
            popup,
            at: site.position,
        })
    }

    fn bind_directions(&self, popup: &Element, at: LngLat, address: &str) -> Result<(), JsValue> {
        let actions = self.actions.clone();
        let address = address.to_owned();
        on_action(popup, DIRECTIONS_ACTION, move || {
            actions.directions(at, &address)
        })
    }
}

fn marker_element(icon: Markup) -> Result<HtmlElement, JsValue> {
    let element = document().create_element("div")?;
    element.set_class_name("marker");
    element.set_inner_html(&icon.into_string());
    Ok(element.unchecked_into())
}

fn popup_element(content: Markup) -> Result<Element, JsValue> {
    let element = document().create_element("div")?;
    element.set_inner_html(&content.into_string());
    Ok(element)
}

// the popup lives as long as the page, so the listener does too
fn on_action(popup: &Element, action: &str, handler: impl Fn() + 'static) -> Result<(), JsValue> {
    let selector = format!(r#"[data-action="{action}"]"#);
    match popup.query_selector(&selector)? {
        Some(button) => EventListener::new(&button, "click", move |_| handler()).forget(),
        None => log::warn!("popup has no {action} button"),
    }
    Ok(())
}
