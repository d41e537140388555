use serde::{Deserialize, Serialize};

use crate::geojson::Feature;

/// Which icon a station marker gets, keyed off the power of its first plug.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IconTier {
    Orange,
    Blue,
    Green,
    Highlighted,
}

impl IconTier {
    /// The CSS color the frontend styles the marker with.
    pub fn css_color(&self) -> &'static str {
        match self {
            IconTier::Orange => "orange",
            IconTier::Blue => "blue",
            IconTier::Green => "green",
            IconTier::Highlighted => "#00C3FF",
        }
    }
}

/// Pick the icon tier for a marker.
///
/// Selection wins over everything. Otherwise fast chargers above 200 kW get
/// green, the 50 to 200 kW midrange gets blue, and anything below that,
/// including stations reporting nonsense power values, falls back to orange.
pub fn select_icon_tier(plug1_power: f64, selected: bool) -> IconTier {
    if selected {
        return IconTier::Highlighted;
    }
    if plug1_power > 200.0 {
        IconTier::Green
    } else if plug1_power >= 50.0 {
        IconTier::Blue
    } else {
        IconTier::Orange
    }
}

/// Sum the station counts of the features grouped under one cluster badge.
///
/// A feature with no `num_stations` contributes zero. That keeps the badge
/// rendering through dirty data instead of taking the map down with it.
pub fn cluster_station_count<'a>(features: impl IntoIterator<Item = &'a Feature>) -> u32 {
    let mut total = 0u32;
    for feature in features {
        match feature.num_stations() {
            Some(count) => total += count,
            None => {
                tracing::warn!(
                    "Feature {:?} has no num_stations, counting it as 0 in the cluster badge",
                    feature.id()
                );
            }
        }
    }
    total
}

/// Clustering radius in pixels for a zoom level.
///
/// Wide at country scale, tighter in the regional band, and off entirely
/// once the view is close enough that individual markers are useful.
pub fn cluster_radius_for_zoom(zoom: u8) -> u32 {
    if zoom > 6 && zoom < 9 {
        50
    } else if zoom > 8 {
        0
    } else {
        80
    }
}
