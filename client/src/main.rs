use std::rc::Rc;

use gloo::utils::document;
use ocmap_shared::config::MapConfig;
use sycamore::{
    futures::{spawn_local, spawn_local_scoped},
    prelude::*,
};

use crate::map_view::MapView;

mod actions;
mod loader;
mod map_view;
mod mapbox;
mod panels;

const MAP_CONTAINER: &str = "map";
const LAYER_PANEL: &str = "layer_panel";

/// Renders the location checkbox and loads the datasets. The checkbox drives
/// the facility markers on every change and once more when loading is done.
fn layer_panel(view: Rc<MapView>, config: MapConfig) {
    let Some(panel) = document().get_element_by_id(LAYER_PANEL) else {
        log::error!("there is no #{LAYER_PANEL} element");
        return;
    };

    sycamore::render_to(
        |cx| {
            let show_locations = create_signal(cx, true);

            let effect_view = view.clone();
            create_effect(cx, move || effect_view.show_facilities(*show_locations.get()));

            spawn_local_scoped(cx, async move {
                view.load(&config).await;
                view.show_facilities(*show_locations.get_untracked());
            });

            view! {cx,
                div(class="field") {
                    input(id="oc-locations-checkbox", type="checkbox", bind:checked=show_locations)
                    label(for="oc-locations-checkbox") {"Orange County locations"}
                }
            }
        },
        &panel,
    );
}

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        gloo::console::error!(format!("logger not initialised: {err}"));
    }

    spawn_local(async {
        let config = loader::fetch_config().await;
        let view = Rc::new(MapView::new(MAP_CONTAINER, &config));
        panels::panel_toggles();
        layer_panel(view, config);
    });
}
