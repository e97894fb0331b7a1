use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{LayerMap, is_layer_dictionary};
use crate::error::{LayerStackError, LayerStackResult};
use crate::image::{ImageConverter, ImageLoader};

use super::{LayerStack, LayerStackConfig};

/// Persistable description of an asset-backed layer stack.
///
/// In JSON, layer indices are object keys written as decimal strings:
///
/// ```json
/// { "config": { "max_layers": 8 }, "layers": { "0": "paper", "1": "ink" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerManifest {
    #[serde(default)]
    pub config: LayerStackConfig,
    #[serde(default, deserialize_with = "deserialize_unique_layers")]
    pub layers: LayerMap<String>,
}

impl LayerManifest {
    #[must_use]
    pub fn new(layers: LayerMap<String>) -> Self {
        Self {
            config: LayerStackConfig::default(),
            layers,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: LayerStackConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether the layer indices already form a contiguous run from zero.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        is_layer_dictionary(&self.layers)
    }

    /// Resolves every identifier through `loader` and builds the stack.
    pub fn build_stack<C, L>(&self, converter: C, loader: &L) -> LayerStackResult<LayerStack<C>>
    where
        C: ImageConverter,
        L: ImageLoader<Image = C::Image> + ?Sized,
    {
        LayerStack::from_identifiers_with_config(converter, loader, &self.layers, self.config)
    }

    pub fn to_json_pretty(&self) -> LayerStackResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LayerStackError::InvalidData(format!("failed to serialize manifest: {e}")))
    }

    /// Parses a manifest; layer ordering is checked later by
    /// [`build_stack`](Self::build_stack).
    pub fn from_json_str(input: &str) -> LayerStackResult<Self> {
        let manifest: Self = serde_json::from_str(input)
            .map_err(|e| LayerStackError::InvalidData(format!("failed to parse manifest: {e}")))?;
        manifest.config.validate()?;
        Ok(manifest)
    }
}

/// Rejects repeated index keys instead of keeping the last one, so a
/// duplicated layer cannot disappear before ordering is validated.
fn deserialize_unique_layers<'de, D>(deserializer: D) -> Result<LayerMap<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueLayers;

    impl<'de> Visitor<'de> for UniqueLayers {
        type Value = LayerMap<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from layer index to asset identifier")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut layers = LayerMap::new();
            while let Some((index, identifier)) = access.next_entry::<i64, String>()? {
                if layers.insert(index, identifier).is_some() {
                    return Err(de::Error::custom(format_args!(
                        "duplicate layer index {index}"
                    )));
                }
            }
            Ok(layers)
        }
    }

    deserializer.deserialize_map(UniqueLayers)
}

#[cfg(test)]
mod tests {
    use super::LayerManifest;
    use crate::error::LayerStackError;

    #[test]
    fn parses_string_keyed_indices() {
        let manifest = LayerManifest::from_json_str(r#"{ "layers": { "1": "ink", "0": "paper" } }"#)
            .expect("manifest parses");
        assert!(manifest.is_dense());
        assert_eq!(manifest.layers.get(&0).map(String::as_str), Some("paper"));
        assert_eq!(manifest.layers.get(&1).map(String::as_str), Some("ink"));
    }

    #[test]
    fn sparse_manifest_parses_but_is_not_dense() {
        let manifest = LayerManifest::from_json_str(r#"{ "layers": { "0": "paper", "2": "ink" } }"#)
            .expect("manifest parses");
        assert!(!manifest.is_dense());
    }

    #[test]
    fn repeated_layer_index_is_rejected() {
        let err = LayerManifest::from_json_str(r#"{ "layers": { "0": "paper", "0": "ink" } }"#)
            .expect_err("duplicate index must fail");
        assert!(matches!(err, LayerStackError::InvalidData(_)));
        assert!(err.to_string().contains("duplicate layer index 0"));
    }

    #[test]
    fn invalid_config_is_rejected_on_parse() {
        let err = LayerManifest::from_json_str(r#"{ "config": { "max_layers": 0 } }"#)
            .expect_err("zero limit must fail");
        assert!(err.to_string().contains("max_layers"));
    }
}
