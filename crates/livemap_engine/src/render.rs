use std::collections::HashMap;

use livemap_core::{LatLng, LatLngBounds, StationRecord};

use crate::shell::{MapShell, Marker, MarkerIcon};

/// Redraws the cluster group from a display subset.
pub struct Renderer {
    fit_padding: (u32, u32),
}

impl Renderer {
    pub fn new(fit_padding: (u32, u32)) -> Self {
        Renderer { fit_padding }
    }

    /// Replace everything in the cluster group with markers for `subset`,
    /// then fit the view around them.
    ///
    /// An empty subset clears the group and leaves the viewport where it
    /// is, since there is nothing to fit around.
    pub fn redraw<S: MapShell>(&self, subset: &HashMap<String, StationRecord>, shell: &mut S) {
        shell.clear_group();

        let mut bounds = LatLngBounds::default();
        for record in subset.values() {
            let position = LatLng::new(record.latitude, record.longitude);
            bounds.extend(position);
            shell.add_marker(Marker {
                position,
                icon: MarkerIcon::for_power(record.plug1_power, false),
                feature: record.to_feature(),
            });
        }

        if bounds.is_valid() {
            shell.fit_bounds(&bounds, self.fit_padding);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new((50, 50))
    }
}
