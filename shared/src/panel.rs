/// Info panels on the page, each with a toggle button, a box and a close button.
pub const PANELS: [&str; 3] = ["notes", "oopp", "additional-notes"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelIds {
    pub toggle: String,
    pub panel: String,
    pub close: String,
}

impl PanelIds {
    pub fn new(name: &str) -> Self {
        Self {
            toggle: format!("toggle-{name}-button"),
            panel: format!("{name}-box"),
            close: format!("close-{name}-button"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelDisplay {
    Shown,
    Hidden,
}

impl PanelDisplay {
    /// Reads an inline `display` value. Only an explicit `none` counts as hidden,
    /// so a box without inline style is treated as open.
    pub fn from_css(display: &str) -> Self {
        if display == "none" {
            Self::Hidden
        } else {
            Self::Shown
        }
    }

    pub const fn css(self) -> &'static str {
        match self {
            Self::Shown => "block",
            Self::Hidden => "none",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Shown => Self::Hidden,
            Self::Hidden => Self::Shown,
        }
    }
}
