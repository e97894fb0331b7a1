use crate::error::LayerStackResult;
use crate::render::{CompositionFrame, Compositor};

/// No-op compositor used by tests and headless stack usage.
///
/// It records what it was handed so tests can assert on the layer order a
/// real backend would have received.
#[derive(Debug, Default)]
pub struct NullCompositor {
    pub last_layer_count: usize,
    pub frames_composited: usize,
}

impl<H> Compositor<H> for NullCompositor {
    fn composite(&mut self, frame: &CompositionFrame<'_, H>) -> LayerStackResult<()> {
        self.last_layer_count = frame.len();
        self.frames_composited += 1;
        Ok(())
    }
}
