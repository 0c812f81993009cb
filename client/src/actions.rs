use std::rc::Rc;

use gloo::{dialogs::alert, utils::window};
use ocmap_shared::{directions::request_directions, LngLat};

use crate::mapbox::Geolocate;

/// Handlers behind the popup buttons.
#[derive(Clone)]
pub struct Actions {
    geolocate: Rc<Geolocate>,
}

impl Actions {
    pub fn new(geolocate: Geolocate) -> Self {
        Self {
            geolocate: Rc::new(geolocate),
        }
    }

    pub fn directions(&self, destination: LngLat, address: &str) {
        log::debug!("directions to {address} ({}, {})", destination.lat, destination.lng);
        request_directions(self.geolocate.as_ref(), address, open_directions);
    }

    pub fn report_out_of_stock(&self, name: &str) {
        log::info!("out of stock reported for {name}");
        alert(&format!("Reported: {name} is out of stock."));
    }
}

fn open_directions(url: String) {
    if let Err(err) = window().open_with_url_and_target(&url, "_blank") {
        log::error!("could not open {url}: {err:?}");
    }
}
