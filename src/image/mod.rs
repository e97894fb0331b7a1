mod memory;

pub use memory::{MemoryImageCatalog, MemoryImageConverter, PremultipliedImage, RgbaImage};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoImageConverter, CairoPngLoader};

/// Resolves named assets into platform-native decoded images.
///
/// Returning `None` means the asset could not be located. Decoding failures
/// that still produce an image are caught later by [`ImageConverter::convert`].
pub trait ImageLoader {
    type Image;

    fn load_image(&self, identifier: &str) -> Option<Self::Image>;
}

/// Converts between the platform-native image used at the boundary and the
/// opaque handle a [`LayerStack`](crate::api::LayerStack) stores.
///
/// Both directions may fail; the stack decides how a failure surfaces.
pub trait ImageConverter {
    /// Platform-native decoded image accepted from and returned to callers.
    type Image;
    /// Internal representation owned by the stack.
    type Handle;

    fn convert(&self, image: &Self::Image) -> Option<Self::Handle>;

    fn convert_back(&self, handle: &Self::Handle) -> Option<Self::Image>;
}
