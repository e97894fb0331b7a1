use std::fs::File;
use std::path::{Path, PathBuf};

use cairo::{Format, ImageSurface};
use tracing::{debug, warn};

use super::memory::pixel_len;
use super::{ImageConverter, ImageLoader, PremultipliedImage};

const BYTES_PER_PIXEL: usize = 4;

/// Converts ARGB32 Cairo surfaces into premultiplied RGBA handles and back.
///
/// Cairo stores ARGB32 pixels premultiplied in native-endian `u32` words, so
/// conversion only reorders channels and drops row padding. Surfaces in any
/// other format are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CairoImageConverter;

impl ImageConverter for CairoImageConverter {
    type Image = ImageSurface;
    type Handle = PremultipliedImage;

    fn convert(&self, surface: &ImageSurface) -> Option<PremultipliedImage> {
        if surface.format() != Format::ARgb32 {
            return None;
        }
        let width = u32::try_from(surface.width()).ok()?;
        let height = u32::try_from(surface.height()).ok()?;
        let stride = usize::try_from(surface.stride()).ok()?;
        let row_len = width as usize * BYTES_PER_PIXEL;

        surface.flush();
        let mut pixels = Vec::with_capacity(pixel_len(width, height)?);
        surface
            .with_data(|data| {
                for row in data.chunks(stride).take(height as usize) {
                    let Some(row) = row.get(..row_len) else {
                        return;
                    };
                    for px in row.chunks_exact(BYTES_PER_PIXEL) {
                        let [a, r, g, b] =
                            u32::from_ne_bytes([px[0], px[1], px[2], px[3]]).to_be_bytes();
                        pixels.extend_from_slice(&[r, g, b, a]);
                    }
                }
            })
            .ok()?;

        PremultipliedImage::from_premultiplied(width, height, pixels)
    }

    fn convert_back(&self, handle: &PremultipliedImage) -> Option<ImageSurface> {
        let width = i32::try_from(handle.width()).ok()?;
        let height = i32::try_from(handle.height()).ok()?;
        let stride = Format::ARgb32.stride_for_width(handle.width()).ok()?;
        let stride_len = usize::try_from(stride).ok()?;
        let row_len = handle.width() as usize * BYTES_PER_PIXEL;

        let mut data = vec![0_u8; stride_len.checked_mul(handle.height() as usize)?];
        for (src_row, dst_row) in handle
            .pixels()
            .chunks_exact(row_len)
            .zip(data.chunks_exact_mut(stride_len))
        {
            for (src, dst) in src_row
                .chunks_exact(BYTES_PER_PIXEL)
                .zip(dst_row.chunks_exact_mut(BYTES_PER_PIXEL))
            {
                let word = u32::from_be_bytes([src[3], src[0], src[1], src[2]]);
                dst.copy_from_slice(&word.to_ne_bytes());
            }
        }

        ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride).ok()
    }
}

/// Loads `<root>/<identifier>.png` into Cairo image surfaces.
///
/// Identifiers must be plain file stems; anything that could escape `root`
/// is treated as not found.
#[derive(Debug, Clone)]
pub struct CairoPngLoader {
    root: PathBuf,
}

impl CairoPngLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, identifier: &str) -> Option<PathBuf> {
        let plain = !identifier.is_empty()
            && !identifier.starts_with('.')
            && !identifier.contains(['/', '\\']);
        plain.then(|| self.root.join(format!("{identifier}.png")))
    }
}

impl ImageLoader for CairoPngLoader {
    type Image = ImageSurface;

    fn load_image(&self, identifier: &str) -> Option<ImageSurface> {
        let Some(path) = self.path_for(identifier) else {
            debug!(identifier, "rejecting non-plain png identifier");
            return None;
        };
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "png asset not found");
                return None;
            }
        };
        match ImageSurface::create_from_png(&mut file) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to decode png asset");
                None
            }
        }
    }
}
