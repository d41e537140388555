use livemap_core::{Feature, IconTier, LatLng, LatLngBounds, select_icon_tier};
use serde::{Deserialize, Serialize};

/// Corner of the map a control is pinned to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A raster tile source for the base layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

/// Options for the marker cluster group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    pub chunked_loading: bool,
    pub icon_size: u32,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        ClusterOptions {
            chunked_loading: true,
            icon_size: 40,
        }
    }
}

/// The icon a single station marker is drawn with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub tier: IconTier,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

impl MarkerIcon {
    /// The station pin, tier picked from plug power, anchored at its
    /// bottom center so the tip points at the coordinate.
    pub fn for_power(plug1_power: f64, selected: bool) -> Self {
        MarkerIcon {
            tier: select_icon_tier(plug1_power, selected),
            size: (30, 30),
            anchor: (15, 30),
        }
    }
}

/// One marker ready for the shell, with the wire feature attached so
/// popups and cluster badges can read the station properties back.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub feature: Feature,
}

/// The drawing surface the render layer talks to.
///
/// A real implementation forwards these calls to a map widget. Tests
/// record them and assert on the sequence.
pub trait MapShell {
    fn create_map(&mut self, center: LatLng, zoom: u8);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn set_max_bounds(&mut self, bounds: &LatLngBounds);
    fn add_zoom_control(&mut self, position: ControlPosition);
    fn create_cluster_group(&mut self, options: ClusterOptions);
    fn add_marker(&mut self, marker: Marker);
    fn clear_group(&mut self);
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: (u32, u32));
}
