use serde::{Deserialize, Serialize};

/// A geographic coordinate, latitude first the way mapping libraries take it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// Rectangular bounds spanned by a south-west and a north-east corner.
///
/// Starts empty and grows point by point, so it can accumulate marker
/// positions for a fit-bounds call. Empty bounds are invalid and must not
/// be handed to the map shell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatLngBounds {
    corners: Option<(LatLng, LatLng)>,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        let mut bounds = LatLngBounds::default();
        bounds.extend(south_west);
        bounds.extend(north_east);
        bounds
    }

    /// Grow the bounds to include `point`.
    pub fn extend(&mut self, point: LatLng) {
        self.corners = match self.corners {
            None => Some((point, point)),
            Some((sw, ne)) => Some((
                LatLng::new(sw.lat.min(point.lat), sw.lng.min(point.lng)),
                LatLng::new(ne.lat.max(point.lat), ne.lng.max(point.lng)),
            )),
        };
    }

    /// Whether at least one point has been added.
    pub fn is_valid(&self) -> bool {
        self.corners.is_some()
    }

    pub fn south_west(&self) -> Option<LatLng> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<LatLng> {
        self.corners.map(|(_, ne)| ne)
    }

    /// `minLon,minLat,maxLon,maxLat`, the order the stations API expects
    /// in its `bounds` query parameter. Empty bounds have nothing to format.
    pub fn to_bbox_string(&self) -> Option<String> {
        self.corners
            .map(|(sw, ne)| format!("{},{},{},{}", sw.lng, sw.lat, ne.lng, ne.lat))
    }
}
