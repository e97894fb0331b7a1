mod config;
mod manifest;
mod snapshot;
mod stack;

pub use config::{LayerStackConfig, MAX_INITIAL_CAPACITY};
pub use manifest::LayerManifest;
pub use snapshot::{LayerSnapshot, LayerStackSnapshot};
pub use stack::LayerStack;
