use serde::{Deserialize, Serialize};

use crate::error::{LayerStackError, LayerStackResult};

/// Largest `initial_capacity` accepted from configuration.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// Public layer stack configuration.
///
/// This type is serializable so host applications can persist/load stack setup
/// next to their layer manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerStackConfig {
    /// Upper bound on the number of layers; `None` means unbounded.
    #[serde(default)]
    pub max_layers: Option<usize>,
    /// Number of slots reserved up front.
    #[serde(default)]
    pub initial_capacity: usize,
}

impl LayerStackConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of layers the stack may hold.
    #[must_use]
    pub fn with_max_layers(mut self, max_layers: usize) -> Self {
        self.max_layers = Some(max_layers);
        self
    }

    /// Sets the number of slots reserved on construction.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn validate(self) -> LayerStackResult<Self> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(LayerStackError::InvalidData(format!(
                "initial_capacity ({}) must not exceed {MAX_INITIAL_CAPACITY}",
                self.initial_capacity
            )));
        }
        if let Some(max_layers) = self.max_layers {
            if max_layers == 0 {
                return Err(LayerStackError::InvalidData(
                    "max_layers must be > 0".to_owned(),
                ));
            }
            if self.initial_capacity > max_layers {
                return Err(LayerStackError::InvalidData(format!(
                    "initial_capacity ({}) must not exceed max_layers ({max_layers})",
                    self.initial_capacity
                )));
            }
        }
        Ok(self)
    }

    /// Fails when a stack of `count` layers would exceed `max_layers`.
    pub fn ensure_capacity_for(self, count: usize) -> LayerStackResult<()> {
        match self.max_layers {
            Some(limit) if count > limit => Err(LayerStackError::LayerLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> LayerStackResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| LayerStackError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> LayerStackResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| LayerStackError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}
