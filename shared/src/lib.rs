pub mod config;
pub mod directions;
pub mod location;
pub mod marker;
pub mod panel;
pub mod popup;
pub mod registry;

pub use location::{Facility, FacilityKind, LngLat, LocationError, NarcanKind, NarcanSite};
pub use registry::{MarkerHandle, MarkerRegistry};
