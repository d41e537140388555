mod fingerprint;
mod geo;
mod geojson;
mod markers;
mod models;

pub use crate::fingerprint::fingerprint;
pub use crate::geo::{LatLng, LatLngBounds};
pub use crate::geojson::{Feature, FeatureCollection, PointGeometry, StationProperties};
pub use crate::markers::{IconTier, cluster_radius_for_zoom, cluster_station_count, select_icon_tier};
pub use crate::models::StationRecord;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedFeature {
    #[error("Feature {index} has no station id")]
    MissingId { index: usize },
    #[error("Feature {index} (station {id}) is missing the {property} property")]
    MissingProperty {
        index: usize,
        id: String,
        property: &'static str,
    },
    #[error("Feature {index} (station {id}) has no geometry")]
    MissingGeometry { index: usize, id: String },
    #[error("Feature {index} (station {id}) has geometry type {kind:?}, expected Point")]
    NotAPoint {
        index: usize,
        id: String,
        kind: String,
    },
    #[error("Feature {index} (station {id}) has {got} coordinate components, expected at least 2")]
    BadCoordinates { index: usize, id: String, got: usize },
}

/// The two numbers the station-count callback reports: how many markers a
/// subset draws and how many charging stations they add up to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub count: usize,
    pub total_stations: u32,
}

impl Aggregates {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a StationRecord>) -> Self {
        let mut count = 0;
        let mut total_stations = 0;
        for record in records {
            count += 1;
            total_stations += record.num_stations;
        }
        Aggregates {
            count,
            total_stations,
        }
    }
}

/// Build the GeoJSON wire form of a station subset.
pub fn to_feature_collection(subset: &HashMap<String, StationRecord>) -> FeatureCollection {
    FeatureCollection::new(subset.values().map(StationRecord::to_feature).collect())
}

/// Holds every station the viewer has ever been told about (`all`) next to
/// the subset it is currently displaying (`current`).
///
/// The store only ever learns stations once, from the first full fetch.
/// Later fetches narrow or restore `current` but never touch `all`.
#[derive(Debug, Clone, Default)]
pub struct StationStore {
    all: HashMap<String, StationRecord>,
    current: HashMap<String, StationRecord>,
    initialized: bool,
}

impl StationStore {
    pub fn new() -> Self {
        StationStore::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn get_all(&self) -> &HashMap<String, StationRecord> {
        &self.all
    }

    pub fn get_current(&self) -> &HashMap<String, StationRecord> {
        &self.current
    }

    /// Seed the store from the first full fetch.
    ///
    /// Every feature is validated before anything is committed, so a single
    /// malformed entry leaves the store exactly as it was. Returns `Ok(true)`
    /// when the store was seeded and `Ok(false)` when it already held data
    /// and the call did nothing.
    pub fn initialize_from_full(
        &mut self,
        collection: &FeatureCollection,
    ) -> Result<bool, MalformedFeature> {
        if self.initialized {
            return Ok(false);
        }

        // Validate the whole collection before touching the maps.
        let mut records = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.iter().enumerate() {
            records.push(StationRecord::try_from_feature(index, feature)?);
        }

        tracing::info!("Initializing station store with {} stations", records.len());
        self.all = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        self.current = self.all.clone();
        self.initialized = true;
        Ok(true)
    }

    /// Make the display subset the full known set again.
    pub fn reset_current(&mut self) {
        self.current = self.all.clone();
    }

    /// Narrow the display subset to the given ids.
    ///
    /// Ids the store has never seen are dropped without complaint. The
    /// first fetch is the authority on which stations exist.
    pub fn retain_current<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.current = ids
            .into_iter()
            .filter_map(|id| {
                self.all
                    .get(id)
                    .map(|record| (record.id.clone(), record.clone()))
            })
            .collect();
    }

    pub fn current_aggregates(&self) -> Aggregates {
        Aggregates::of(self.current.values())
    }

    pub fn all_aggregates(&self) -> Aggregates {
        Aggregates::of(self.all.values())
    }

    pub fn current_as_feature_collection(&self) -> FeatureCollection {
        to_feature_collection(&self.current)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn station_feature(id: &str, num_stations: u32, plug1_power: f64) -> Feature {
        StationRecord {
            id: id.to_string(),
            latitude: 39.5,
            longitude: -98.35,
            num_stations,
            plug1_power,
        }
        .to_feature()
    }

    fn full_collection() -> FeatureCollection {
        FeatureCollection::new(vec![
            station_feature("a", 2, 22.0),
            station_feature("b", 4, 150.0),
            station_feature("c", 1, 350.0),
        ])
    }

    #[test]
    fn test_initialize_from_full() {
        let mut store = StationStore::new();
        assert!(!store.is_initialized());

        let seeded = store.initialize_from_full(&full_collection());
        assert_eq!(seeded, Ok(true));
        assert!(store.is_initialized());
        assert_eq!(store.get_all().len(), 3);
        assert_eq!(store.get_current().len(), 3);
        assert_eq!(
            store.all_aggregates(),
            Aggregates {
                count: 3,
                total_stations: 7,
            }
        );
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut store = StationStore::new();
        store
            .initialize_from_full(&full_collection())
            .expect("Could not seed the store");

        // A second full fetch must not replace the known set.
        let other = FeatureCollection::new(vec![station_feature("z", 9, 11.0)]);
        let seeded = store.initialize_from_full(&other);
        assert_eq!(seeded, Ok(false));
        assert_eq!(store.get_all().len(), 3);
        assert!(store.get_all().contains_key("a"));
        assert!(!store.get_all().contains_key("z"));
    }

    #[test]
    fn test_initialize_rejects_malformed_atomically() {
        let mut collection = full_collection();
        if let Some(feature) = collection.features.get_mut(1) {
            feature.geometry = None;
        }

        let mut store = StationStore::new();
        let result = store.initialize_from_full(&collection);
        match result {
            Err(MalformedFeature::MissingGeometry { index, id }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "b");
            }
            other => panic!("Expected MissingGeometry, got {other:?}"),
        }

        // Nothing was committed, a later clean fetch can still seed.
        assert!(!store.is_initialized());
        assert!(store.get_all().is_empty());
        let seeded = store.initialize_from_full(&full_collection());
        assert_eq!(seeded, Ok(true));
    }

    #[test]
    fn test_initialize_from_empty_collection() {
        let mut store = StationStore::new();
        let seeded = store.initialize_from_full(&FeatureCollection::new(Vec::new()));
        assert_eq!(seeded, Ok(true));
        assert!(store.is_initialized());
        assert_eq!(
            store.current_aggregates(),
            Aggregates {
                count: 0,
                total_stations: 0,
            }
        );
    }

    #[test]
    fn test_retain_current_drops_unknown_ids() {
        let mut store = StationStore::new();
        store
            .initialize_from_full(&full_collection())
            .expect("Could not seed the store");

        store.retain_current(["a", "ghost", "c"]);
        assert_eq!(store.get_current().len(), 2);
        assert!(store.get_current().contains_key("a"));
        assert!(store.get_current().contains_key("c"));
        assert!(!store.get_current().contains_key("ghost"));
        // The full set is untouched by a narrowing.
        assert_eq!(store.get_all().len(), 3);
    }

    #[test]
    fn test_reset_current_restores_full_set() {
        let mut store = StationStore::new();
        store
            .initialize_from_full(&full_collection())
            .expect("Could not seed the store");

        store.retain_current(["b"]);
        assert_eq!(
            store.current_aggregates(),
            Aggregates {
                count: 1,
                total_stations: 4,
            }
        );

        store.reset_current();
        assert_eq!(store.get_current(), store.get_all());
        assert_eq!(
            store.current_aggregates(),
            Aggregates {
                count: 3,
                total_stations: 7,
            }
        );
    }

    #[test]
    fn test_current_as_feature_collection() {
        let mut store = StationStore::new();
        store
            .initialize_from_full(&full_collection())
            .expect("Could not seed the store");
        store.retain_current(["a", "b"]);

        let collection = store.current_as_feature_collection();
        assert_eq!(collection.kind, "FeatureCollection");
        assert_eq!(collection.features.len(), 2);

        let mut ids: Vec<_> = collection
            .features
            .iter()
            .filter_map(|feature| feature.id().map(str::to_string))
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_aggregates_of_empty_subset() {
        let aggregates = Aggregates::of([]);
        assert_eq!(aggregates.count, 0);
        assert_eq!(aggregates.total_stations, 0);
    }
}
