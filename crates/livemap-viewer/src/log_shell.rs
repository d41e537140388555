use livemap_core::{LatLng, LatLngBounds, cluster_radius_for_zoom, cluster_station_count};
use livemap_engine::{ClusterOptions, ControlPosition, MapShell, Marker, TileLayer};

/// A map shell that renders to the log instead of a widget.
///
/// The session drives it exactly like a real map, so the viewer runs
/// headless: every draw call becomes a log line, and the cluster badge
/// total is computed from the markers currently in the group.
#[derive(Default)]
pub struct LogMapShell {
    markers: Vec<Marker>,
    zoom: Option<u8>,
}

impl LogMapShell {
    pub fn get_markers(&self) -> &[Marker] {
        &self.markers
    }

    /// What a single badge over the whole group would show.
    pub fn cluster_badge_total(&self) -> u32 {
        cluster_station_count(self.markers.iter().map(|marker| &marker.feature))
    }
}

impl MapShell for LogMapShell {
    fn create_map(&mut self, center: LatLng, zoom: u8) {
        self.zoom = Some(zoom);
        tracing::info!("Map created at ({}, {}), zoom {}", center.lat, center.lng, zoom);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        tracing::info!(
            "Tile layer {} (max zoom {})",
            layer.url_template,
            layer.max_zoom
        );
    }

    fn set_max_bounds(&mut self, bounds: &LatLngBounds) {
        tracing::info!(
            "Max bounds {}",
            bounds.to_bbox_string().unwrap_or_else(|| "none".to_string())
        );
    }

    fn add_zoom_control(&mut self, position: ControlPosition) {
        tracing::info!("Zoom control at {:?}", position);
    }

    fn create_cluster_group(&mut self, options: ClusterOptions) {
        let radius = cluster_radius_for_zoom(self.zoom.unwrap_or_default());
        tracing::info!(
            "Cluster group ready (chunked loading {}, icon {}px, radius {}px at this zoom)",
            options.chunked_loading,
            options.icon_size,
            radius
        );
    }

    fn add_marker(&mut self, marker: Marker) {
        tracing::debug!(
            "Marker {} ({:?}) at ({}, {})",
            marker.feature.id().unwrap_or("?"),
            marker.icon.tier,
            marker.position.lat,
            marker.position.lng
        );
        self.markers.push(marker);
    }

    fn clear_group(&mut self) {
        tracing::debug!("Clearing {} markers", self.markers.len());
        self.markers.clear();
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: (u32, u32)) {
        tracing::info!(
            "Showing {} markers covering {} stations, fitted to {} (padding {:?})",
            self.markers.len(),
            self.cluster_badge_total(),
            bounds.to_bbox_string().unwrap_or_else(|| "none".to_string()),
            padding
        );
    }
}
