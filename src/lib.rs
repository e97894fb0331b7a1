//! layer-stack: dense, contiguously indexed image layers for compositors.
//!
//! A [`LayerStack`] keeps image handles at indices `0..count()` and restores
//! that ordering after every mutation. Image loading and conversion are
//! delegated to collaborators ([`image::ImageLoader`],
//! [`image::ImageConverter`]); compositing is delegated to a
//! [`render::Compositor`].

pub mod api;
pub mod core;
pub mod error;
pub mod image;
pub mod render;
pub mod telemetry;

pub use api::{LayerManifest, LayerStack, LayerStackConfig};
pub use crate::core::{LayerMap, is_layer_dictionary};
pub use error::{LayerStackError, LayerStackResult};
