mod render;
mod shell;

pub use crate::render::Renderer;
pub use crate::shell::{ClusterOptions, ControlPosition, MapShell, Marker, MarkerIcon, TileLayer};

use livemap_core::{
    Aggregates, Feature, FeatureCollection, MalformedFeature, StationStore, fingerprint,
};
use serde::{Deserialize, Serialize};

/// How a fetch was folded into the display set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReconcileOutcome {
    /// First fetch, it seeded the store and is shown in full.
    InitialLoad,
    /// Same dataset as the previous fetch, the full set is shown again.
    Unchanged,
    /// A different dataset, the display narrowed to the ids it carried.
    Filtered,
    /// Caller asked for a reset, the full set is shown again.
    ForcedReset,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileSummary {
    pub outcome: ReconcileOutcome,
    pub aggregates: Aggregates,
}

/// Folds incoming station fetches into the station store.
///
/// The first fetch is taken as the authoritative full dataset. From then
/// on each fetch is compared to the previous one by content hash: an equal
/// fetch restores the full display set, a different one narrows the
/// display to the station ids it carries. Ids the first fetch never
/// mentioned are dropped without complaint.
pub struct ReconcileEngine {
    store: StationStore,
    dataset_hash: Option<u32>,
}

impl ReconcileEngine {
    pub fn new() -> Self {
        ReconcileEngine {
            store: StationStore::new(),
            dataset_hash: None,
        }
    }

    pub fn get_store(&self) -> &StationStore {
        &self.store
    }

    pub fn reconcile(
        &mut self,
        input: &FeatureCollection,
    ) -> Result<ReconcileSummary, MalformedFeature> {
        self.apply(input, false)
    }

    /// Like [`reconcile`](Self::reconcile), but an already seeded store
    /// goes back to showing the full set no matter what the fetch carried.
    pub fn reconcile_with_reset(
        &mut self,
        input: &FeatureCollection,
    ) -> Result<ReconcileSummary, MalformedFeature> {
        self.apply(input, true)
    }

    fn apply(
        &mut self,
        input: &FeatureCollection,
        reset: bool,
    ) -> Result<ReconcileSummary, MalformedFeature> {
        let hash = fingerprint(input);

        let outcome = if self.store.initialize_from_full(input)? {
            self.dataset_hash = Some(hash);
            ReconcileOutcome::InitialLoad
        } else if reset {
            self.store.reset_current();
            self.dataset_hash = Some(hash);
            ReconcileOutcome::ForcedReset
        } else if self.dataset_hash == Some(hash) {
            self.store.reset_current();
            ReconcileOutcome::Unchanged
        } else {
            self.store
                .retain_current(input.features.iter().filter_map(Feature::id));
            self.dataset_hash = Some(hash);
            ReconcileOutcome::Filtered
        };

        let aggregates = self.store.current_aggregates();
        tracing::info!(
            "Reconciled fetch as {:?}: {} markers, {} stations",
            outcome,
            aggregates.count,
            aggregates.total_stations
        );
        Ok(ReconcileSummary {
            outcome,
            aggregates,
        })
    }
}

impl Default for ReconcileEngine {
    fn default() -> Self {
        ReconcileEngine::new()
    }
}
