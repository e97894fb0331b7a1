use thiserror::Error;

pub type LayerStackResult<T> = Result<T, LayerStackError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerStackError {
    #[error("invalid layer ordering: index {missing} is missing from {count} layers")]
    InvalidLayerOrdering { missing: usize, count: usize },

    #[error("image not found: {identifier}")]
    ImageNotFound { identifier: String },

    #[error("invalid image{}", describe_identifier(.identifier.as_deref()))]
    InvalidImage { identifier: Option<String> },

    #[error("layer limit exceeded: at most {limit} layers allowed")]
    LayerLimitExceeded { limit: usize },

    #[error("layer index out of bounds: index={index}, count={count}")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl LayerStackError {
    pub(crate) fn invalid_image(identifier: Option<&str>) -> Self {
        Self::InvalidImage {
            identifier: identifier.map(str::to_owned),
        }
    }
}

fn describe_identifier(identifier: Option<&str>) -> String {
    identifier.map_or_else(String::new, |identifier| format!(": {identifier}"))
}
