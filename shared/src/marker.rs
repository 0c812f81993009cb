//! Icon markup for markers and popup headers.
//!
//! Icons are `lord-icon` web components loaded from the lordicon CDN; the
//! page includes their script.

use maud::{html, Markup};

use crate::location::{FacilityKind, NarcanKind};

const LORDICON_CDN: &str = "https://cdn.lordicon.com";

/// Visual identity of a location kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    pub icon: &'static str,
    pub glyph: &'static str,
    pub color: &'static str,
}

impl NarcanKind {
    pub const fn style(self) -> KindStyle {
        match self {
            NarcanKind::Oppp => KindStyle {
                icon: "daeumrty",
                glyph: "🏠",
                color: "#f9c9c0",
            },
            NarcanKind::Distribution => KindStyle {
                icon: "bpmglzll",
                glyph: "💊",
                color: "#e83a30",
            },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            NarcanKind::Oppp => "OPPP Location",
            NarcanKind::Distribution => "Narcan Distribution",
        }
    }
}

impl FacilityKind {
    pub fn style(&self) -> KindStyle {
        let (glyph, color) = match self {
            FacilityKind::AdultCare => ("🏥", "#16c72e"),
            FacilityKind::NursingHome => ("🏠", "#e83a30"),
            FacilityKind::Hospital => ("🏨", "#3080e8"),
            FacilityKind::Other(_) => ("📍", "#9E9E9E"),
        };
        KindStyle {
            icon: "bpmglzll",
            glyph,
            color,
        }
    }
}

pub fn lordicon_src(icon: &str) -> String {
    format!("{LORDICON_CDN}/{icon}.json")
}

/// Inner HTML of a Narcan/OPPP marker element.
pub fn narcan_marker_html(kind: NarcanKind) -> Markup {
    let style = kind.style();
    html! {
        @match kind {
            NarcanKind::Oppp => {
                lord-icon src=(lordicon_src(style.icon)) trigger="hover" state="hover-wave"
                    colors=(format!("primary:{},secondary:#ebe6ef,tertiary:#000000,quaternary:#b26836", style.color))
                    style="width:40px;height:40px" {}
            }
            NarcanKind::Distribution => {
                lord-icon src=(lordicon_src(style.icon)) trigger="hover"
                    colors=(format!("primary:{}", style.color))
                    style="width:40px;height:40px" {}
            }
        }
    }
}

/// Inner HTML of a care-facility marker element. The element itself is 30px square.
pub fn facility_marker_html(kind: &FacilityKind) -> Markup {
    let style = kind.style();
    html! {
        lord-icon src=(lordicon_src(style.icon)) trigger="hover" state="hover-jump-roll"
            colors=(format!("primary:{}", style.color))
            style="width:30px;height:30px;display:block" {}
    }
}
