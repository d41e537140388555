use serde::{Deserialize, Serialize};

use crate::MalformedFeature;
use crate::geojson::{Feature, PointGeometry, StationProperties};

/// A charging station as the map logic sees it, with every field the
/// display path needs already validated and unwrapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub num_stations: u32,
    pub plug1_power: f64,
}

impl StationRecord {
    /// Validate one wire feature into a record.
    ///
    /// `index` is the feature's position in the collection and only feeds
    /// the error message, so a log line can point at the offending entry.
    pub fn try_from_feature(index: usize, feature: &Feature) -> Result<StationRecord, MalformedFeature> {
        let Some(id) = feature.id() else {
            return Err(MalformedFeature::MissingId { index });
        };
        let id = id.to_string();
        let Some(num_stations) = feature.num_stations() else {
            return Err(MalformedFeature::MissingProperty {
                index,
                id,
                property: "num_stations",
            });
        };
        let Some(plug1_power) = feature.plug1_power() else {
            return Err(MalformedFeature::MissingProperty {
                index,
                id,
                property: "plug1_power",
            });
        };
        let Some(geometry) = feature.geometry.as_ref() else {
            return Err(MalformedFeature::MissingGeometry { index, id });
        };
        if geometry.kind != "Point" {
            return Err(MalformedFeature::NotAPoint {
                index,
                id,
                kind: geometry.kind.clone(),
            });
        }
        if geometry.coordinates.len() < 2 {
            return Err(MalformedFeature::BadCoordinates {
                index,
                id,
                got: geometry.coordinates.len(),
            });
        }
        // GeoJSON positions are longitude first.
        Ok(StationRecord {
            id,
            latitude: geometry.coordinates[1],
            longitude: geometry.coordinates[0],
            num_stations,
            plug1_power,
        })
    }

    /// Build the wire form back from a record. Used when handing a display
    /// subset to anything that speaks GeoJSON, markers included.
    pub fn to_feature(&self) -> Feature {
        Feature {
            kind: "Feature".to_string(),
            properties: Some(StationProperties {
                id: Some(self.id.clone()),
                num_stations: Some(self.num_stations),
                plug1_power: Some(self.plug1_power),
            }),
            geometry: Some(PointGeometry::new(self.longitude, self.latitude)),
        }
    }
}
