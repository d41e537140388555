//! Wire format of the stations API: a GeoJSON feature collection of points.
//!
//! The types here are deliberately lenient. A feature may arrive without an
//! id, without counts, or without geometry; it still deserializes, and the
//! store decides what to do with it. Strictness at the parse boundary would
//! turn per-feature data problems into whole-fetch failures.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<StationProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<PointGeometry>,
}

impl Feature {
    /// Station id, if the feature carries one.
    pub fn id(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.id.as_deref())
    }

    pub fn num_stations(&self) -> Option<u32> {
        self.properties.as_ref().and_then(|p| p.num_stations)
    }

    pub fn plug1_power(&self) -> Option<f64> {
        self.properties.as_ref().and_then(|p| p.plug1_power)
    }
}

/// Properties block of a station feature. All members are optional on the
/// wire; validation happens when records are built from features.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StationProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_stations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plug1_power: Option<f64>,
}

/// Point geometry as GeoJSON writes it: coordinates are `[longitude,
/// latitude]`, with an optional altitude we ignore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl PointGeometry {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        PointGeometry {
            kind: "Point".to_string(),
            coordinates: vec![longitude, latitude],
        }
    }
}
