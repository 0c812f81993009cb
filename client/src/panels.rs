use gloo::{events::EventListener, utils::document};
use ocmap_shared::panel::{PanelDisplay, PanelIds, PANELS};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub fn panel_toggles() {
    for name in PANELS {
        if let Err(missing) = wire_panel(&PanelIds::new(name)) {
            log::warn!("panel {name} not wired: there is no #{missing}");
        }
    }
}

fn wire_panel(ids: &PanelIds) -> Result<(), String> {
    let toggle = get_element(&ids.toggle)?;
    let close = get_element(&ids.close)?;
    let panel: HtmlElement = get_element(&ids.panel)?.unchecked_into();

    let toggled = panel.clone();
    EventListener::new(&toggle, "click", move |_| {
        let current = toggled
            .style()
            .get_property_value("display")
            .unwrap_or_default();
        set_display(&toggled, PanelDisplay::from_css(&current).toggled());
    })
    .forget();

    EventListener::new(&close, "click", move |_| {
        set_display(&panel, PanelDisplay::Hidden)
    })
    .forget();

    Ok(())
}

fn set_display(panel: &HtmlElement, display: PanelDisplay) {
    if let Err(err) = panel.style().set_property("display", display.css()) {
        log::warn!("could not set panel display: {err:?}");
    }
}

fn get_element(id: &str) -> Result<Element, String> {
    document().get_element_by_id(id).ok_or_else(|| id.to_owned())
}
