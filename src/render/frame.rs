/// Borrowed, ordered view of a layer stack for one composition pass.
///
/// `layers()[0]` is the bottom layer; later entries are drawn on top.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionFrame<'a, H> {
    layers: Vec<&'a H>,
}

impl<'a, H> CompositionFrame<'a, H> {
    #[must_use]
    pub fn from_handles(handles: impl IntoIterator<Item = &'a H>) -> Self {
        Self {
            layers: handles.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn layers(&self) -> &[&'a H] {
        &self.layers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[must_use]
    pub fn bottom(&self) -> Option<&'a H> {
        self.layers.first().copied()
    }

    #[must_use]
    pub fn top(&self) -> Option<&'a H> {
        self.layers.last().copied()
    }

    /// Keeps only the layers whose index satisfies `keep`, preserving order.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        Self {
            layers: self
                .layers
                .iter()
                .enumerate()
                .filter(|(index, _)| keep(*index))
                .map(|(_, handle)| *handle)
                .collect(),
        }
    }
}
