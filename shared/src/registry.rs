/// The only thing the map view ever does to a placed marker.
pub trait MarkerHandle {
    fn set_visible(&self, visible: bool);
}

/// Markers of one dataset, in the order their features were fetched.
///
/// Append-only: handles are never removed or reordered, only hidden.
#[derive(Debug)]
pub struct MarkerRegistry<M> {
    handles: Vec<M>,
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
        }
    }
}

impl<M: MarkerHandle> MarkerRegistry<M> {
    pub fn push(&mut self, handle: M) {
        self.handles.push(handle);
    }

    /// Appends in iteration order.
    pub fn extend(&mut self, handles: impl IntoIterator<Item = M>) {
        self.handles.extend(handles);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.handles.iter()
    }

    pub fn apply_visibility(&self, visible: bool) {
        log::debug!(
            "setting {} markers {}",
            self.handles.len(),
            if visible { "visible" } else { "hidden" }
        );
        for handle in &self.handles {
            handle.set_visible(visible);
        }
    }
}
