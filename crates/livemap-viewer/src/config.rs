use livemap_core::LatLng;
use livemap_engine::{ClusterOptions, ControlPosition, TileLayer};
use serde::{Deserialize, Serialize};

/// Represents the viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Base URL of the stations API
    pub api_base_url: String,
    /// Seconds between two station fetches
    pub refresh_interval_secs: u64,
    pub map: MapConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            api_base_url: "http://localhost:5000".to_string(),
            refresh_interval_secs: 30,
            map: MapConfig::default(),
        }
    }
}

/// Represents the initial view and layers of the map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub center: LatLng,
    /// Initial zoom level
    pub zoom: u8,
    pub tile_layer: TileLayer,
    /// South-west corner the map cannot pan past
    pub max_bounds_south_west: LatLng,
    /// North-east corner the map cannot pan past
    pub max_bounds_north_east: LatLng,
    pub zoom_control: ControlPosition,
    pub cluster: ClusterOptions,
    /// Pixel padding around fitted marker bounds
    pub fit_padding: (u32, u32),
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: LatLng::new(39.50, -98.35),
            zoom: 4,
            tile_layer: TileLayer {
                url_template: "https://tiles.stadiamaps.com/tiles/osm_bright/{z}/{x}/{y}{r}.png"
                    .to_string(),
                attribution: "&copy; <a href=\"https://stadiamaps.com/\" target=\"_blank\">Stadia Maps</a> &copy; <a href=\"https://openmaptiles.org/\" target=\"_blank\">OpenMapTiles</a> &copy; <a href=\"https://www.openstreetmap.org/about\" target=\"_blank\">OpenStreetMap</a> contributors"
                    .to_string(),
                max_zoom: 20,
            },
            max_bounds_south_west: LatLng::new(-89.98155760646617, -180.0),
            max_bounds_north_east: LatLng::new(89.99346179538875, 180.0),
            zoom_control: ControlPosition::TopRight,
            cluster: ClusterOptions::default(),
            fit_padding: (50, 50),
        }
    }
}
