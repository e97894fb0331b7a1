use serde::{Deserialize, Serialize};

/// Where a layer's image came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "identifier", rename_all = "snake_case")]
pub enum LayerSource {
    /// Resolved by name through an image loader.
    Asset(String),
    /// Handed over as an already decoded image.
    Image,
}

impl LayerSource {
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Asset(identifier) => Some(identifier),
            Self::Image => None,
        }
    }
}

/// One occupied slot of a layer stack.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry<H> {
    handle: H,
    source: LayerSource,
}

impl<H> LayerEntry<H> {
    #[must_use]
    pub fn new(handle: H, source: LayerSource) -> Self {
        Self { handle, source }
    }

    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    #[must_use]
    pub fn source(&self) -> &LayerSource {
        &self.source
    }

    #[must_use]
    pub fn into_handle(self) -> H {
        self.handle
    }
}
