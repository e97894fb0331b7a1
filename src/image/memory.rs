use indexmap::IndexMap;

use super::{ImageConverter, ImageLoader};

const CHANNELS: usize = 4;

/// Straight-alpha RGBA8 image, the platform representation of the in-memory
/// collaborator.
///
/// Geometry is not checked on construction so hosts can hand over whatever
/// their decoder produced; [`MemoryImageConverter`] rejects inconsistent
/// buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    #[must_use]
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = pixel_len(width, height).unwrap_or(0);
        let pixels = rgba.iter().copied().cycle().take(len).collect();
        Self::from_raw(width, height, pixels)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        pixel_len(self.width, self.height) == Some(self.pixels.len()) && !self.pixels.is_empty()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.pixels.get(offset..offset + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Premultiplied RGBA8 pixels, the handle type stored by a layer stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremultipliedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PremultipliedImage {
    /// Builds a handle from already premultiplied pixels.
    ///
    /// Returns `None` when the buffer does not match `width * height * 4`.
    #[must_use]
    pub fn from_premultiplied(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.is_empty() || pixel_len(width, height) != Some(pixels.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Converter between [`RgbaImage`] and [`PremultipliedImage`].
///
/// Back-conversion divides by alpha, so translucent pixels may not round-trip
/// exactly. Fully opaque and fully transparent pixels are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryImageConverter;

impl ImageConverter for MemoryImageConverter {
    type Image = RgbaImage;
    type Handle = PremultipliedImage;

    fn convert(&self, image: &RgbaImage) -> Option<PremultipliedImage> {
        if !image.is_valid() {
            return None;
        }
        let mut pixels = image.pixels.clone();
        for px in pixels.chunks_exact_mut(CHANNELS) {
            let alpha = px[3];
            for channel in &mut px[..3] {
                *channel = premultiply(*channel, alpha);
            }
        }
        PremultipliedImage::from_premultiplied(image.width, image.height, pixels)
    }

    fn convert_back(&self, handle: &PremultipliedImage) -> Option<RgbaImage> {
        let mut pixels = handle.pixels.clone();
        for px in pixels.chunks_exact_mut(CHANNELS) {
            let alpha = px[3];
            for channel in &mut px[..3] {
                *channel = unpremultiply(*channel, alpha);
            }
        }
        let image = RgbaImage::from_raw(handle.width, handle.height, pixels);
        image.is_valid().then_some(image)
    }
}

/// Named in-memory asset store.
///
/// Identifiers are matched exactly; lookups never touch the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageCatalog {
    images: IndexMap<String, RgbaImage>,
}

impl MemoryImageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image(mut self, identifier: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(identifier, image);
        self
    }

    /// Registers an image, returning the one previously stored under the same
    /// identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, image: RgbaImage) -> Option<RgbaImage> {
        self.images.insert(identifier.into(), image)
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.images.contains_key(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageLoader for MemoryImageCatalog {
    type Image = RgbaImage;

    fn load_image(&self, identifier: &str) -> Option<RgbaImage> {
        self.images.get(identifier).cloned()
    }
}

pub(crate) fn pixel_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    let value = (u32::from(channel) * u32::from(alpha) + 127) / 255;
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    if alpha == 0 {
        return 0;
    }
    let alpha = u32::from(alpha);
    let value = (u32::from(channel) * 255 + alpha / 2) / alpha;
    u8::try_from(value).unwrap_or(u8::MAX)
}
