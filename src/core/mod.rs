pub mod entry;
pub mod ordering;

pub use entry::{LayerEntry, LayerSource};
pub use ordering::{LayerMap, is_layer_dictionary, validate_layer_ordering};
