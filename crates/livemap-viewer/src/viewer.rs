use livemap_core::{Aggregates, FeatureCollection, LatLngBounds};
use livemap_engine::{MapShell, ReconcileEngine, ReconcileSummary, Renderer};
use livemap_fetch::{StationFetcher, StationQuery};

use crate::config::ViewerConfig;

/// Wires fetching, reconciling and rendering together for one map view.
///
/// Fetch and reconcile failures are logged and swallowed here: the map
/// keeps showing whatever the last good fetch produced.
pub struct ViewerSession<F: StationFetcher, S: MapShell> {
    config: ViewerConfig,
    engine: ReconcileEngine,
    renderer: Renderer,
    fetcher: F,
    shell: S,
    viewport: StationQuery,
    on_station_count: Option<Box<dyn FnMut(usize, u32)>>,
}

impl<F: StationFetcher, S: MapShell> ViewerSession<F, S> {
    pub fn new(config: ViewerConfig, fetcher: F, shell: S) -> Self {
        // The first fetch covers the whole pannable area, so the store is
        // seeded with every station the backend knows about.
        let viewport = StationQuery {
            bounds: LatLngBounds::new(
                config.map.max_bounds_south_west,
                config.map.max_bounds_north_east,
            ),
            zoom: config.map.zoom,
        };
        let renderer = Renderer::new(config.map.fit_padding);
        ViewerSession {
            config,
            engine: ReconcileEngine::new(),
            renderer,
            fetcher,
            shell,
            viewport,
            on_station_count: None,
        }
    }

    /// Register the callback invoked after every redraw with the marker
    /// count and the charging station total of the display set.
    pub fn on_station_count(&mut self, callback: impl FnMut(usize, u32) + 'static) {
        self.on_station_count = Some(Box::new(callback));
    }

    /// Run the map setup sequence against the shell.
    pub fn initialize_map(&mut self) {
        let map = &self.config.map;
        self.shell.create_map(map.center, map.zoom);
        self.shell.add_tile_layer(&map.tile_layer);
        self.shell.set_max_bounds(&LatLngBounds::new(
            map.max_bounds_south_west,
            map.max_bounds_north_east,
        ));
        self.shell.add_zoom_control(map.zoom_control);
        self.shell.create_cluster_group(map.cluster);
    }

    pub fn set_viewport(&mut self, viewport: StationQuery) {
        self.viewport = viewport;
    }

    pub fn get_shell(&self) -> &S {
        &self.shell
    }

    pub fn current_aggregates(&self) -> Aggregates {
        self.engine.get_store().current_aggregates()
    }

    /// Fetch the current viewport and fold the result into the display.
    pub async fn refresh(&mut self) -> Option<ReconcileSummary> {
        let collection = self.fetch().await?;
        self.apply_fetch(&collection, false)
    }

    /// Like [`refresh`](Self::refresh), but the display goes back to the
    /// full station set no matter what the fetch carried.
    pub async fn refresh_reset(&mut self) -> Option<ReconcileSummary> {
        let collection = self.fetch().await?;
        self.apply_fetch(&collection, true)
    }

    async fn fetch(&self) -> Option<FeatureCollection> {
        match self.fetcher.fetch_stations(&self.viewport).await {
            Ok(collection) => Some(collection),
            Err(error) => {
                tracing::warn!("Stations fetch failed, keeping the previous display: {}", error);
                None
            }
        }
    }

    fn apply_fetch(&mut self, collection: &FeatureCollection, reset: bool) -> Option<ReconcileSummary> {
        let result = if reset {
            self.engine.reconcile_with_reset(collection)
        } else {
            self.engine.reconcile(collection)
        };
        let summary = match result {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(
                    "Stations fetch was malformed, keeping the previous display: {}",
                    error
                );
                return None;
            }
        };

        self.renderer
            .redraw(self.engine.get_store().get_current(), &mut self.shell);
        if let Some(callback) = self.on_station_count.as_mut() {
            callback(summary.aggregates.count, summary.aggregates.total_stations);
        }
        Some(summary)
    }
}
