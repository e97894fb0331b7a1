use serde::{Deserialize, Serialize};

use crate::core::LayerSource;
use crate::error::{LayerStackError, LayerStackResult};

/// Serializable deterministic view of a layer stack used by regression tests
/// and debugging tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub index: usize,
    pub source: LayerSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStackSnapshot {
    pub count: usize,
    pub max_layers: Option<usize>,
    pub layers: Vec<LayerSnapshot>,
}

impl LayerStackSnapshot {
    /// Returns `true` when `layers` lists exactly the indices `0..count` in order.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.layers.len() == self.count
            && self
                .layers
                .iter()
                .enumerate()
                .all(|(position, layer)| layer.index == position)
    }

    /// Identifiers of asset-backed layers, bottom to top.
    #[must_use]
    pub fn identifiers(&self) -> Vec<Option<&str>> {
        self.layers
            .iter()
            .map(|layer| layer.source.identifier())
            .collect()
    }

    pub fn to_json_pretty(&self) -> LayerStackResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LayerStackError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn from_json_str(input: &str) -> LayerStackResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| LayerStackError::InvalidData(format!("failed to parse snapshot: {e}")))
    }
}
