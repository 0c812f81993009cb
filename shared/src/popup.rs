//! Popup bodies for both datasets.
//!
//! Action buttons carry a `data-action` attribute; the client binds its
//! listeners to them after the markup is attached to the popup element.

use maud::{html, Markup};

use crate::{
    location::{Facility, NarcanKind, NarcanSite},
    marker::lordicon_src,
};

pub const DIRECTIONS_ACTION: &str = "directions";
pub const OUT_OF_STOCK_ACTION: &str = "out-of-stock";

pub const HOURS_FALLBACK: &str = "Contact facility for hours";

pub fn narcan_popup_html(site: &NarcanSite) -> Markup {
    let style = site.kind.style();
    html! {
        div.modern-popup {
            div.popup-header {
                div.popup-icon {
                    lord-icon src=(lordicon_src(style.icon)) trigger="loop"
                        colors=(format!("primary:{}", style.color))
                        style="width:24px;height:24px" {}
                }
                div.popup-title {
                    h3 { (site.name) }
                    span.popup-type { (site.kind.label()) }
                }
            }
            div.popup-content {
                (address_and_hours(&site.address, &site.hours))
                (directions_button())
                @if site.kind == NarcanKind::Distribution {
                    div.info-section {
                        (info_item("💊", "Narcan Location", &site.narcan_location))
                    }
                    div.popup-actions {
                        button.action-btn.restock-btn data-action=(OUT_OF_STOCK_ACTION) {
                            span.btn-icon { "⚠️" }
                            span.btn-text { "Report Out of Stock" }
                        }
                    }
                }
            }
        }
    }
}

pub fn facility_popup_html(facility: &Facility) -> Markup {
    let style = facility.kind.style();
    let hours = facility.hours.as_deref().unwrap_or(HOURS_FALLBACK);
    html! {
        div.modern-popup {
            div.popup-header {
                // 8-digit hex: accent colour at ~12% alpha
                div.popup-icon style=(format!("background-color: {}20;", style.color)) {
                    span.type-icon { (style.glyph) }
                }
                div.popup-title {
                    h3 { (facility.name) }
                    span.popup-type style=(format!("color: {};", style.color)) {
                        (facility.kind.label())
                    }
                }
            }
            div.popup-content {
                (address_and_hours(&facility.address, hours))
                (directions_button())
            }
        }
    }
}

fn address_and_hours(address: &str, hours: &str) -> Markup {
    html! {
        div.info-section {
            (info_item("📍", "Address", address))
            (info_item("🕒", "Hours", hours))
        }
    }
}

fn info_item(icon: &str, label: &str, value: &str) -> Markup {
    html! {
        div.info-item {
            div.info-icon { (icon) }
            div.info-text {
                label { (label) }
                p { (value) }
            }
        }
    }
}

fn directions_button() -> Markup {
    html! {
        div.popup-actions {
            button.action-btn.directions-btn data-action=(DIRECTIONS_ACTION) {
                span.btn-icon { "🚗" }
                span.btn-text { "Get Directions" }
            }
        }
    }
}
