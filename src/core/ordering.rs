use indexmap::IndexMap;

use crate::error::{LayerStackError, LayerStackResult};

/// Index-keyed layer sources as supplied by callers.
///
/// Keys are plain integers so that negative or sparse input can be represented
/// and rejected instead of silently clamped.
pub type LayerMap<S> = IndexMap<i64, S>;

/// Returns `true` when the keys of `layers` are exactly `0..layers.len()`.
///
/// An empty map is a valid (empty) layer dictionary.
#[must_use]
pub fn is_layer_dictionary<S>(layers: &LayerMap<S>) -> bool {
    first_missing_index(layers).is_none()
}

/// Fails with [`LayerStackError::InvalidLayerOrdering`] on the first index in
/// `0..layers.len()` that has no entry.
pub fn validate_layer_ordering<S>(layers: &LayerMap<S>) -> LayerStackResult<()> {
    match first_missing_index(layers) {
        Some(missing) => Err(LayerStackError::InvalidLayerOrdering {
            missing,
            count: layers.len(),
        }),
        None => Ok(()),
    }
}

/// Looks up the source stored for a zero-based layer position.
fn source_at<S>(layers: &LayerMap<S>, index: usize) -> Option<&S> {
    i64::try_from(index).ok().and_then(|key| layers.get(&key))
}

fn first_missing_index<S>(layers: &LayerMap<S>) -> Option<usize> {
    // Keys are unique, so `len` present keys inside `0..len` cover the range.
    (0..layers.len()).find(|&index| source_at(layers, index).is_none())
}
