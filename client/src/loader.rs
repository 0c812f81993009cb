use geojson::FeatureCollection;
use gloo::{dialogs::alert, net::http::Request};
use ocmap_shared::{
    config::{MapConfig, CONFIG_PATH},
    LocationError,
};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Net(#[from] gloo::net::Error),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("could not build marker: {0}")]
    Dom(String),
}

impl From<JsValue> for LoadError {
    fn from(value: JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }
}

impl LoadError {
    /// The only error surface the user sees.
    pub fn report(&self) {
        log::error!("error loading locations: {self}");
        alert(&format!("Error loading locations: {self}"));
    }
}

pub async fn fetch_collection(url: &str) -> Result<FeatureCollection, LoadError> {
    log::debug!("fetching {url}");
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }
    let collection: FeatureCollection = response.json().await?;
    log::debug!("{url}: {} features", collection.features.len());
    Ok(collection)
}

/// Fetches `config.json` next to the page, falling back to the built-in map settings.
pub async fn fetch_config() -> MapConfig {
    async fn inner() -> Result<MapConfig, LoadError> {
        let response = Request::get(CONFIG_PATH).send().await?;
        if !response.ok() {
            return Err(LoadError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    match inner().await {
        Ok(config) => config,
        Err(err) => {
            log::warn!("no usable {CONFIG_PATH} ({err}), using defaults");
            MapConfig::default()
        }
    }
}
