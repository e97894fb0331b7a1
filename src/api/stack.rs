use std::fmt;

use tracing::{debug, trace};

use crate::core::{LayerEntry, LayerMap, LayerSource, validate_layer_ordering};
use crate::error::{LayerStackError, LayerStackResult};
use crate::image::{ImageConverter, ImageLoader};
use crate::render::{CompositionFrame, Compositor};

use super::{LayerSnapshot, LayerStackConfig, LayerStackSnapshot};

/// Ordered image layers addressed by contiguous zero-based indices.
///
/// Index `0` is the bottom layer and `count() - 1` the topmost one. Every
/// successful operation leaves the occupied indices as exactly
/// `0..count()`: removals compact the entries above the removed slot, and
/// growth only ever happens at a position inside `0..=count()`.
///
/// The stack owns its converter and uses it at the boundary: decoded images
/// come in through [`ImageConverter::convert`] and leave through
/// [`ImageConverter::convert_back`]. Loaders are only borrowed during
/// construction.
pub struct LayerStack<C: ImageConverter> {
    converter: C,
    entries: Vec<LayerEntry<C::Handle>>,
    config: LayerStackConfig,
}

impl<C: ImageConverter> fmt::Debug for LayerStack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerStack")
            .field("count", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: ImageConverter> LayerStack<C> {
    /// Creates an empty, unbounded stack.
    #[must_use]
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            entries: Vec::new(),
            config: LayerStackConfig::default(),
        }
    }

    /// Creates an empty stack with validated `config`.
    pub fn with_config(converter: C, config: LayerStackConfig) -> LayerStackResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            converter,
            entries: reserve_entries(config.initial_capacity)?,
            config,
        })
    }

    /// Builds a stack from index-keyed asset identifiers.
    ///
    /// The index set is validated before any image is loaded. Each identifier
    /// is then loaded and converted; the first failure aborts construction
    /// and nothing is returned.
    pub fn from_identifiers<L>(
        converter: C,
        loader: &L,
        layers: &LayerMap<String>,
    ) -> LayerStackResult<Self>
    where
        L: ImageLoader<Image = C::Image> + ?Sized,
    {
        Self::from_identifiers_with_config(converter, loader, layers, LayerStackConfig::default())
    }

    pub fn from_identifiers_with_config<L>(
        converter: C,
        loader: &L,
        layers: &LayerMap<String>,
        config: LayerStackConfig,
    ) -> LayerStackResult<Self>
    where
        L: ImageLoader<Image = C::Image> + ?Sized,
    {
        let config = config.validate()?;
        let entries = resolve_entries(layers, config, |identifier: &String| {
            let image = loader
                .load_image(identifier)
                .ok_or_else(|| LayerStackError::ImageNotFound {
                    identifier: identifier.clone(),
                })?;
            let handle = converter
                .convert(&image)
                .ok_or_else(|| LayerStackError::invalid_image(Some(identifier.as_str())))?;
            Ok(LayerEntry::new(handle, LayerSource::Asset(identifier.clone())))
        })?;
        debug!(count = entries.len(), "built layer stack from identifiers");
        Ok(Self {
            converter,
            entries,
            config,
        })
    }

    /// Builds a stack from index-keyed decoded images.
    ///
    /// Same validation and all-or-nothing contract as
    /// [`from_identifiers`](Self::from_identifiers); conversion failures carry
    /// no identifier.
    pub fn from_images(converter: C, layers: &LayerMap<C::Image>) -> LayerStackResult<Self> {
        Self::from_images_with_config(converter, layers, LayerStackConfig::default())
    }

    pub fn from_images_with_config(
        converter: C,
        layers: &LayerMap<C::Image>,
        config: LayerStackConfig,
    ) -> LayerStackResult<Self> {
        let config = config.validate()?;
        let entries = resolve_entries(layers, config, |image: &C::Image| {
            let handle = converter
                .convert(image)
                .ok_or_else(|| LayerStackError::invalid_image(None))?;
            Ok(LayerEntry::new(handle, LayerSource::Image))
        })?;
        debug!(count = entries.len(), "built layer stack from images");
        Ok(Self {
            converter,
            entries,
            config,
        })
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> LayerStackConfig {
        self.config
    }

    #[must_use]
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Returns the image at `index` in the platform representation.
    ///
    /// A missing index and a failed back-conversion both yield `None`; use
    /// [`try_layer`](Self::try_layer) to tell them apart.
    #[must_use]
    pub fn layer(&self, index: usize) -> Option<C::Image> {
        self.try_layer(index).unwrap_or_else(|err| {
            debug!(index, error = %err, "layer conversion failed, reporting as absent");
            None
        })
    }

    /// Returns `Ok(None)` for a missing index and
    /// [`LayerStackError::InvalidImage`] when the stored handle cannot be
    /// converted back.
    pub fn try_layer(&self, index: usize) -> LayerStackResult<Option<C::Image>> {
        let Some(entry) = self.entries.get(index) else {
            return Ok(None);
        };
        self.converter
            .convert_back(entry.handle())
            .map(Some)
            .ok_or_else(|| LayerStackError::invalid_image(entry.source().identifier()))
    }

    #[must_use]
    pub fn handle(&self, index: usize) -> Option<&C::Handle> {
        self.entries.get(index).map(LayerEntry::handle)
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&LayerEntry<C::Handle>> {
        self.entries.get(index)
    }

    /// Iterates `(index, entry)` pairs from the bottom layer to the top.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LayerEntry<C::Handle>)> {
        self.entries.iter().enumerate()
    }

    /// Converts `image` and pushes it as the new topmost layer.
    ///
    /// Returns the index the layer was stored at, which is the previous
    /// `count()`.
    pub fn append_layer(&mut self, image: &C::Image) -> LayerStackResult<usize> {
        self.config.ensure_capacity_for(self.entries.len() + 1)?;
        let entry = self.convert_image(image)?;
        let index = self.entries.len();
        self.entries.push(entry);
        trace!(index, count = self.entries.len(), "append layer");
        Ok(index)
    }

    /// Converts `image` and stores it at `index`, shifting layers at and
    /// above `index` up by one.
    ///
    /// `index == count()` behaves like [`append_layer`](Self::append_layer).
    pub fn insert_layer(&mut self, index: usize, image: &C::Image) -> LayerStackResult<()> {
        let count = self.entries.len();
        if index > count {
            return Err(LayerStackError::IndexOutOfBounds { index, count });
        }
        self.config.ensure_capacity_for(count + 1)?;
        let entry = self.convert_image(image)?;
        self.entries.insert(index, entry);
        trace!(index, count = self.entries.len(), "insert layer");
        Ok(())
    }

    /// Swaps the image at `index` for `image`, returning the previous entry.
    ///
    /// Indices and count are unchanged.
    pub fn replace_layer(
        &mut self,
        index: usize,
        image: &C::Image,
    ) -> LayerStackResult<LayerEntry<C::Handle>> {
        let count = self.entries.len();
        if index >= count {
            return Err(LayerStackError::IndexOutOfBounds { index, count });
        }
        let entry = self.convert_image(image)?;
        trace!(index, "replace layer");
        Ok(std::mem::replace(&mut self.entries[index], entry))
    }

    /// Removes the layer at `index` and compacts the layers above it.
    ///
    /// Every entry at `old > index` ends up at `old - 1`. Removing an absent
    /// index is a no-op and returns `None`.
    pub fn remove_layer(&mut self, index: usize) -> Option<LayerEntry<C::Handle>> {
        if index >= self.entries.len() {
            trace!(index, count = self.entries.len(), "remove layer: index absent");
            return None;
        }
        // `Vec::remove` shifts the tail down in ascending order.
        let removed = self.entries.remove(index);
        trace!(index, count = self.entries.len(), "remove layer");
        Some(removed)
    }

    /// Moves the layer at `from` so that it ends up at `to`.
    ///
    /// Layers between the two positions shift by one towards `from`.
    pub fn move_layer(&mut self, from: usize, to: usize) -> LayerStackResult<()> {
        let count = self.entries.len();
        for index in [from, to] {
            if index >= count {
                return Err(LayerStackError::IndexOutOfBounds { index, count });
            }
        }
        if from == to {
            return Ok(());
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        trace!(from, to, "move layer");
        Ok(())
    }

    /// Drops every layer.
    pub fn clear(&mut self) {
        debug!(count = self.entries.len(), "clear layer stack");
        self.entries.clear();
    }

    /// Borrows all handles in bottom-to-top order for a compositor.
    #[must_use]
    pub fn frame(&self) -> CompositionFrame<'_, C::Handle> {
        CompositionFrame::from_handles(self.entries.iter().map(LayerEntry::handle))
    }

    /// Hands the current layer order to `compositor`.
    pub fn composite<R>(&self, compositor: &mut R) -> LayerStackResult<()>
    where
        R: Compositor<C::Handle> + ?Sized,
    {
        let frame = self.frame();
        trace!(count = frame.len(), "composite layer stack");
        compositor.composite(&frame)
    }

    /// Serializable view of indices and sources for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> LayerStackSnapshot {
        LayerStackSnapshot {
            count: self.entries.len(),
            max_layers: self.config.max_layers,
            layers: self
                .iter()
                .map(|(index, entry)| LayerSnapshot {
                    index,
                    source: entry.source().clone(),
                })
                .collect(),
        }
    }

    fn convert_image(&self, image: &C::Image) -> LayerStackResult<LayerEntry<C::Handle>> {
        let handle = self
            .converter
            .convert(image)
            .ok_or_else(|| LayerStackError::invalid_image(None))?;
        Ok(LayerEntry::new(handle, LayerSource::Image))
    }
}

/// Validates `layers` and resolves every source in ascending index order.
///
/// Resolution writes into a scratch vector; callers only see it on success.
fn resolve_entries<S, H, F>(
    layers: &LayerMap<S>,
    config: LayerStackConfig,
    mut resolve: F,
) -> LayerStackResult<Vec<LayerEntry<H>>>
where
    F: FnMut(&S) -> LayerStackResult<LayerEntry<H>>,
{
    validate_layer_ordering(layers)?;
    let count = layers.len();
    config.ensure_capacity_for(count)?;

    // After validation the keys are a permutation of `0..count`.
    let mut ordered: Vec<(i64, &S)> = layers.iter().map(|(&key, source)| (key, source)).collect();
    ordered.sort_unstable_by_key(|&(key, _)| key);

    let mut entries = reserve_entries(count.max(config.initial_capacity))?;
    for (_, source) in ordered {
        entries.push(resolve(source)?);
    }
    Ok(entries)
}

fn reserve_entries<H>(capacity: usize) -> LayerStackResult<Vec<LayerEntry<H>>> {
    let mut entries = Vec::new();
    entries.try_reserve(capacity).map_err(|err| {
        LayerStackError::InvalidData(format!("failed to reserve {capacity} layer slots: {err}"))
    })?;
    Ok(entries)
}
