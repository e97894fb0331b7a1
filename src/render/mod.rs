mod frame;
mod null_compositor;

pub use frame::CompositionFrame;
pub use null_compositor::NullCompositor;

use crate::error::LayerStackResult;

/// Contract implemented by any compositing backend.
///
/// Backends receive the stack's handles in bottom-to-top order so blending
/// code stays isolated from index bookkeeping.
pub trait Compositor<H> {
    fn composite(&mut self, frame: &CompositionFrame<'_, H>) -> LayerStackResult<()>;
}
