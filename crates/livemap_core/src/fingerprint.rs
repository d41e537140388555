use xxhash_rust::xxh32::xxh32;

use crate::geojson::FeatureCollection;

const FINGERPRINT_SEED: u32 = 0;

/// Content hash of a station collection.
///
/// Two fetches hash equal exactly when they carry the same stations with
/// the same display-relevant fields in the same order. The buffer encodes
/// each optional field behind a presence byte so an absent value never
/// collides with a present zero.
pub fn fingerprint(collection: &FeatureCollection) -> u32 {
    let mut buf = Vec::new();
    for feature in &collection.features {
        match feature.id() {
            Some(id) => {
                buf.push(1);
                buf.extend_from_slice(&(id.len() as u32).to_le_bytes());
                buf.extend_from_slice(id.as_bytes());
            }
            None => buf.push(0),
        }
        match feature.num_stations() {
            Some(count) => {
                buf.push(1);
                buf.extend_from_slice(&count.to_le_bytes());
            }
            None => buf.push(0),
        }
        match feature.plug1_power() {
            Some(power) => {
                buf.push(1);
                buf.extend_from_slice(&power.to_le_bytes());
            }
            None => buf.push(0),
        }
        match feature.geometry.as_ref() {
            Some(geometry) => {
                buf.push(1);
                buf.extend_from_slice(&(geometry.coordinates.len() as u32).to_le_bytes());
                for coordinate in &geometry.coordinates {
                    buf.extend_from_slice(&coordinate.to_le_bytes());
                }
            }
            None => buf.push(0),
        }
        // Record separator between features.
        buf.push(0x1E);
    }
    xxh32(&buf, FINGERPRINT_SEED)
}
