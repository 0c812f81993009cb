use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::location::LngLat;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Origin used when the device position is not available.
pub const FALLBACK_ORIGIN: LngLat = LngLat::new(-74.3231, 41.4026);

// same set `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Driving directions from `origin` to a street address.
pub fn directions_url(origin: LngLat, address: &str) -> String {
    let destination = utf8_percent_encode(address, URI_COMPONENT);
    format!(
        "{DIRECTIONS_BASE}&origin={},{}&destination={destination}&travelmode=driving",
        origin.lat, origin.lng
    )
}

/// The device-position source behind the directions button.
pub trait Geolocator {
    /// Registers `f` for the next reported position; it may never run.
    fn once_located(&self, f: impl FnOnce(LngLat) + 'static);
    /// Starts a position request; false when none could be started.
    fn trigger(&self) -> bool;
}

/// Subscribes for the live position, then opens the fallback route straight
/// away if no request could be started. A position that arrives later still
/// opens its own route, so one request can open two.
pub fn request_directions<G: Geolocator>(
    geolocator: &G,
    address: &str,
    open: impl Fn(String) + Clone + 'static,
) {
    let located_address = address.to_owned();
    let open_located = open.clone();
    geolocator.once_located(move |origin| open_located(directions_url(origin, &located_address)));

    if !geolocator.trigger() {
        open(directions_url(FALLBACK_ORIGIN, address));
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    type Pending = RefCell<Option<Box<dyn FnOnce(LngLat)>>>;

    struct FakeGeolocator {
        started: bool,
        pending: Pending,
    }

    impl FakeGeolocator {
        fn new(started: bool) -> Self {
            Self {
                started,
                pending: RefCell::new(None),
            }
        }

        fn locate(&self, at: LngLat) {
            if let Some(f) = self.pending.borrow_mut().take() {
                f(at)
            }
        }
    }

    impl Geolocator for FakeGeolocator {
        fn once_located(&self, f: impl FnOnce(LngLat) + 'static) {
            *self.pending.borrow_mut() = Some(Box::new(f));
        }

        fn trigger(&self) -> bool {
            self.started
        }
    }

    fn opened() -> (Rc<RefCell<Vec<String>>>, impl Fn(String) + Clone + 'static) {
        let urls = Rc::new(RefCell::new(vec![]));
        let sink = urls.clone();
        (urls, move |url: String| sink.borrow_mut().push(url))
    }

    #[test]
    fn no_position_request_opens_fallback() {
        let geolocator = FakeGeolocator::new(false);
        let (urls, open) = opened();
        request_directions(&geolocator, "123 Main St", open);

        assert_eq!(urls.borrow().len(), 1);
        assert!(urls.borrow()[0].contains("origin=41.4026,-74.3231"));
        assert!(urls.borrow()[0].contains("destination=123%20Main%20St"));
    }

    #[test]
    fn live_position_opens_located_route() {
        let geolocator = FakeGeolocator::new(true);
        let (urls, open) = opened();
        request_directions(&geolocator, "123 Main St", open);
        assert!(urls.borrow().is_empty());

        geolocator.locate(LngLat::new(-74.2, 41.5));
        assert_eq!(urls.borrow().len(), 1);
        assert!(urls.borrow()[0].contains("origin=41.5,-74.2"));
        assert!(urls.borrow()[0].contains("destination=123%20Main%20St"));
    }

    #[test]
    fn late_position_after_fallback_opens_both() {
        let geolocator = FakeGeolocator::new(false);
        let (urls, open) = opened();
        request_directions(&geolocator, "123 Main St", open);
        geolocator.locate(LngLat::new(-74.2, 41.5));

        let urls = urls.borrow();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("origin=41.4026,-74.3231"));
        assert!(urls[1].contains("origin=41.5,-74.2"));
    }

    #[test]
    fn fallback_origin() {
        let url = directions_url(FALLBACK_ORIGIN, "123 Main St");
        assert!(url.contains("origin=41.4026,-74.3231"));
        assert!(url.contains("destination=123%20Main%20St"));
        assert!(url.ends_with("&travelmode=driving"));
    }

    #[test]
    fn located_origin() {
        let url = directions_url(LngLat::new(-74.2, 41.5), "123 Main St");
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&origin=41.5,-74.2\
             &destination=123%20Main%20St&travelmode=driving"
        );
    }

    #[test]
    fn encodes_like_uri_component() {
        let url = directions_url(FALLBACK_ORIGIN, "O'Neil's (rear), Goshen & Co #2");
        assert!(url.contains("destination=O'Neil's%20(rear)%2C%20Goshen%20%26%20Co%20%232&"));
    }
}
